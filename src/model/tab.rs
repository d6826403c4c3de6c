use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

pub type TabId = u64;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct TabInfo {
    pub id: TabId,
    pub url: Option<String>,
}

impl TabInfo {
    pub fn new(id: TabId, url: Option<String>) -> Self {
        Self { id, url }
    }
}

const READ_SCROLL_OFFSET_SOURCE: &str = r#"() => ({
  pageYOffset: window.pageYOffset,
  documentScrollTop: document.documentElement ? document.documentElement.scrollTop : null,
  bodyScrollTop: document.body ? document.body.scrollTop : null
})"#;

const SCROLL_TO_SOURCE: &str = r#"(top) => {
  if (typeof window.scrollTo === 'function') {
    window.scrollTo({ top: top, behavior: 'smooth' });
    return 'scrollTo';
  }
  if (document.documentElement && document.documentElement.scrollTop !== undefined) {
    document.documentElement.scrollTop = top;
    return 'documentElement';
  }
  if (document.body && document.body.scrollTop !== undefined) {
    document.body.scrollTop = top;
    return 'body';
  }
  throw new Error('no scroll method available');
}"#;

/// Functions run on demand inside a tab's page context.
#[derive(Clone, Debug, PartialEq)]
pub enum InjectedScript {
    ReadScrollOffset,
    ScrollTo { top: f64 },
}

impl InjectedScript {
    pub fn name(&self) -> &'static str {
        match self {
            InjectedScript::ReadScrollOffset => "readScrollOffset",
            InjectedScript::ScrollTo { .. } => "scrollTo",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            InjectedScript::ReadScrollOffset => READ_SCROLL_OFFSET_SOURCE,
            InjectedScript::ScrollTo { .. } => SCROLL_TO_SOURCE,
        }
    }

    pub fn args(&self) -> Vec<Value> {
        match self {
            InjectedScript::ReadScrollOffset => vec![],
            InjectedScript::ScrollTo { top } => vec![json!(top)],
        }
    }
}

/// Raw offsets returned by [`InjectedScript::ReadScrollOffset`]. Browsers disagree on which
/// of these tracks the viewport, so the largest one wins.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScrollReadings {
    pub page_y_offset: Option<f64>,
    pub document_scroll_top: Option<f64>,
    pub body_scroll_top: Option<f64>,
}

impl ScrollReadings {
    pub fn offset(&self) -> f64 {
        [self.page_y_offset, self.document_scroll_top, self.body_scroll_top]
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_takes_largest_reading() {
        let readings = ScrollReadings {
            page_y_offset: Some(0.0),
            document_scroll_top: Some(640.5),
            body_scroll_top: Some(12.0),
        };
        assert_eq!(readings.offset(), 640.5);
    }

    #[test]
    fn test_offset_never_negative() {
        let readings = ScrollReadings {
            page_y_offset: Some(-30.0),
            document_scroll_top: None,
            body_scroll_top: Some(f64::NAN),
        };
        assert_eq!(readings.offset(), 0.0);
        assert_eq!(ScrollReadings::default().offset(), 0.0);
    }

    #[test]
    fn test_readings_deserialize_with_missing_fields() {
        let readings: ScrollReadings = serde_json::from_value(json!({
            "pageYOffset": 120,
            "documentScrollTop": null
        })).unwrap();
        assert_eq!(readings.offset(), 120.0);
    }

    #[test]
    fn test_scroll_to_passes_target_as_argument() {
        let script = InjectedScript::ScrollTo { top: 500.0 };
        assert_eq!(script.args(), vec![json!(500.0)]);
        assert!(script.source().contains("behavior: 'smooth'"));
        assert!(InjectedScript::ReadScrollOffset.args().is_empty());
    }
}
