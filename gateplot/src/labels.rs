use crate::context::{GatingContext, SampleProvider};
use crate::error::GatePlotError;
use gateplot_geometry::Dimension;

/// Gate path titles longer than this keep only their tail
pub const MAX_TITLE_LEN: usize = 72;
const TITLE_ELLIPSIS: &str = "...";

/// Display label of a plotted axis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisLabel {
    pub text: String,
    /// Short label of the resolved channel, absent for ratio dimensions
    pub pnn: Option<String>,
}

/// Label an axis after its channel, `"long (short)"` when the sample carries
/// a long label. Dimensions naming a fluorochrome are resolved through the
/// compensation matrix to the detector channel.
pub fn axis_label<C, S>(
    dimension: &Dimension,
    context: &C,
    sample: &S,
) -> Result<AxisLabel, GatePlotError>
where
    C: GatingContext + ?Sized,
    S: SampleProvider + ?Sized,
{
    let reference = dimension.reference();
    if dimension.is_ratio() {
        return Ok(AxisLabel {
            text: reference.to_string(),
            pnn: None,
        });
    }

    let index = sample
        .channel_index(reference)
        .or_else(|| {
            let matrix = context.compensation_matrix(dimension.compensation_ref()?)?;
            sample.channel_index(matrix.detector_for(reference)?)
        })
        .ok_or_else(|| GatePlotError::ReferenceNotFound(reference.to_string()))?;

    let pnn = sample
        .pnn_labels()
        .get(index)
        .cloned()
        .ok_or_else(|| GatePlotError::ReferenceNotFound(reference.to_string()))?;
    let pns = sample
        .pns_labels()
        .get(index)
        .map(String::as_str)
        .unwrap_or("");

    let text = if pns.is_empty() {
        pnn.clone()
    } else {
        format!("{pns} ({pnn})")
    };
    Ok(AxisLabel {
        text,
        pnn: Some(pnn),
    })
}

/// `a > b > gate` from the gate's ancestors, leaving out the root
pub fn gate_title(name: &str, path: Option<&[String]>) -> String {
    let Some(path) = path else {
        return name.to_string();
    };
    let title = path
        .iter()
        .skip(1)
        .map(String::as_str)
        .chain(std::iter::once(name))
        .collect::<Vec<_>>()
        .join(" > ");

    let char_count = title.chars().count();
    if char_count > MAX_TITLE_LEN {
        let keep = MAX_TITLE_LEN - TITLE_ELLIPSIS.len();
        let tail: String = title.chars().skip(char_count - keep).collect();
        format!("{TITLE_ELLIPSIS}{tail}")
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn path(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(None, "Gate1")]
    #[case(Some(vec!["root"]), "Gate1")]
    #[case(Some(vec!["root", "Live", "Singlets"]), "Live > Singlets > Gate1")]
    fn test_gate_title(#[case] ancestors: Option<Vec<&str>>, #[case] expected: &str) {
        let ancestors = ancestors.map(|a| path(&a));
        assert_eq!(gate_title("Gate1", ancestors.as_deref()), expected);
    }

    #[test]
    fn test_long_title_keeps_tail() {
        let ancestors = path(&["root", "a".repeat(40).as_str(), "b".repeat(40).as_str()]);
        let title = gate_title("Gate1", Some(&ancestors));
        assert_eq!(title.chars().count(), MAX_TITLE_LEN);
        assert!(title.starts_with("..."));
        assert!(title.ends_with("b > Gate1"));
    }

    #[test]
    fn test_title_at_limit_is_untouched() {
        // 64 + " > " + 5 == 72
        let ancestors = path(&["root", "a".repeat(64).as_str()]);
        let title = gate_title("Gate1", Some(&ancestors));
        assert_eq!(title.len(), 72);
        assert!(!title.starts_with("..."));
    }
}
