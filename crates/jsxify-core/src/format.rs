//! React component template.

/// Component name used when none is configured.
pub const DEFAULT_COMPONENT_NAME: &str = "SvgIcon";

/// Wraps rewritten markup in a function component with a default export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentTemplate {
    name: String,
}

impl ComponentTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opening of every rendered component, up to the markup.
    pub fn declaration(&self) -> String {
        format!("const {} = () => (\n  ", self.name)
    }

    /// Closing of every rendered component.
    pub fn export(&self) -> String {
        format!("export default {};", self.name)
    }

    /// Embed `body` verbatim. No escaping or validation is done here.
    pub fn render(&self, body: &str) -> String {
        format!("{}{}\n);\n\n{}", self.declaration(), body, self.export())
    }
}

impl Default for ComponentTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_COMPONENT_NAME)
    }
}

/// Derive a PascalCase component name from a file stem.
///
/// `arrow-left` becomes `ArrowLeft`. Names that would start with a digit get
/// an `Svg` prefix, and a stem with no usable characters falls back to
/// [`DEFAULT_COMPONENT_NAME`].
pub fn component_name_from_stem(stem: &str) -> String {
    let name: String = stem
        .split(|c: char| !c.is_ascii_alphanumeric())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match name.chars().next() {
        None => DEFAULT_COMPONENT_NAME.to_string(),
        Some(c) if c.is_ascii_digit() => format!("Svg{name}"),
        Some(_) => name,
    }
}

/// Whether `name` can be used as a JavaScript identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_default_template() {
        let out = ComponentTemplate::default().render("<svg></svg>");

        assert_eq!(
            out,
            "const SvgIcon = () => (\n  <svg></svg>\n);\n\nexport default SvgIcon;"
        );
    }

    #[test]
    fn render_starts_and_ends_with_template_parts() {
        let template = ComponentTemplate::new("Logo");
        let out = template.render("<svg>\n</svg>");

        assert!(out.starts_with(&template.declaration()));
        assert!(out.ends_with(&template.export()));
    }

    #[test]
    fn derives_component_names() {
        assert_eq!(component_name_from_stem("arrow-left"), "ArrowLeft");
        assert_eq!(component_name_from_stem("user_profile.outline"), "UserProfileOutline");
        assert_eq!(component_name_from_stem("404"), "Svg404");
        assert_eq!(component_name_from_stem("--"), "SvgIcon");
        assert_eq!(component_name_from_stem("Logo"), "Logo");
    }

    #[test]
    fn validates_identifiers() {
        assert!(is_valid_identifier("SvgIcon"));
        assert!(is_valid_identifier("_icon$2"));
        assert!(!is_valid_identifier("2icon"));
        assert!(!is_valid_identifier("my-icon"));
        assert!(!is_valid_identifier(""));
    }
}
