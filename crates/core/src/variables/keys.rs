//! Mapping from dashboard variable keys to widget option property names.

/// Maps a dashboard variable key to the widget option it drives.
pub trait VariableKeyMapper {
    fn option_key(&self, variable_key: &str) -> Option<String>;
}

impl<F> VariableKeyMapper for F
where
    F: Fn(&str) -> Option<String>,
{
    fn option_key(&self, variable_key: &str) -> Option<String> {
        self(variable_key)
    }
}

/// Managed variables, each driving the `filters.<key>` option.
pub const MANAGED_VARIABLE_KEYS: &[&str] = &[
    "project_group",
    "project",
    "provider",
    "service_account",
    "region",
    "cost_product",
    "asset_account",
];

/// Default mapper: managed variables map to `filters.<key>`, anything else
/// has no widget option.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterKeyMapper;

impl VariableKeyMapper for FilterKeyMapper {
    fn option_key(&self, variable_key: &str) -> Option<String> {
        MANAGED_VARIABLE_KEYS
            .contains(&variable_key)
            .then(|| format!("filters.{variable_key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_key_maps_to_filter() {
        assert_eq!(FilterKeyMapper.option_key("provider").as_deref(), Some("filters.provider"));
    }

    #[test]
    fn test_unknown_key_has_no_option() {
        assert_eq!(FilterKeyMapper.option_key("not-exist"), None);
    }

    #[test]
    fn test_closure_mapper() {
        let mapper = |k: &str| Some(format!("opts.{k}"));
        assert_eq!(mapper.option_key("x").as_deref(), Some("opts.x"));
    }
}
