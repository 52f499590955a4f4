use std::collections::HashMap;

/// Named values a path template can draw its trailing placeholder from.
#[derive(Clone, Debug, Default)]
pub struct TemplateContext(HashMap<String, String>);

impl TemplateContext {
    pub fn new() -> Self {
        TemplateContext::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.0.insert(name.into(), value.to_string());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Resolves the trailing `{var}` / `{/var}` placeholder of `template`.
///
/// Only the last `{` counts, and only when it is not the first character and
/// the template ends with `}`. The placeholder is always stripped; when the
/// context carries the variable, `/<value>` is appended in its place.
pub fn resolve(template: &str, context: &TemplateContext) -> String {
    let split = match template.rfind('{') {
        Some(split) if split > 0 && template.ends_with('}') => split,
        _ => return template.to_owned(),
    };

    let placeholder = &template[split + 1..template.len() - 1];
    let var_name = placeholder.strip_prefix('/').unwrap_or(placeholder);

    let mut path = template[..split].to_owned();
    if let Some(value) = context.get(var_name) {
        path.push('/');
        path.push_str(value);
    }

    path
}

/// Whether a resolved url points at the rate-limit endpoint.
pub fn is_rate_limit(url: &str) -> bool {
    let path = url.split(['?', '#']).next().unwrap_or_default();

    path.split('/').any(|segment| segment == "rate_limit")
}
