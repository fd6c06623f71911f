//! The ordered rewrite pipeline.

use serde::Deserialize;

use crate::format::{ComponentTemplate, DEFAULT_COMPONENT_NAME};
use crate::rename::{CamelCaseRenamer, ClassRenamer, RenameMode, RenameTable};
use crate::style::StyleRestructurer;
use crate::traits::{ConvertError, RewriteRule, Stage};
use crate::validate::validate;

/// Options for a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConvertOptions {
    /// Name of the generated component
    pub component_name: String,

    /// How kebab-case attribute names are found
    pub rename_mode: RenameMode,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
            rename_mode: RenameMode::default(),
        }
    }
}

/// Result of a successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// The source was empty; there is nothing to convert.
    Empty,

    /// Formatted component source.
    Component(String),
}

impl Output {
    /// Output text, empty for [`Output::Empty`].
    pub fn as_str(&self) -> &str {
        match self {
            Output::Empty => "",
            Output::Component(s) => s,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Output::Empty)
    }

    pub fn into_string(self) -> String {
        match self {
            Output::Empty => String::new(),
            Output::Component(s) => s,
        }
    }
}

/// SVG to React component converter.
///
/// Holds the rewrite rules as an explicit list in stage order. Conversions
/// are stateless: the same source always yields the same output.
pub struct Pipeline {
    stages: Vec<Box<dyn RewriteRule>>,
    template: ComponentTemplate,
}

impl Pipeline {
    /// Build the standard pipeline.
    pub fn new(options: &ConvertOptions) -> Self {
        let stages: Vec<Box<dyn RewriteRule>> = vec![
            Box::new(StyleRestructurer::new()),
            Box::new(ClassRenamer::new()),
            Box::new(CamelCaseRenamer::new(options.rename_mode)),
            Box::new(RenameTable::new()),
        ];
        debug_assert!(stages.windows(2).all(|w| w[0].stage() < w[1].stage()));

        Self {
            stages,
            template: ComponentTemplate::new(options.component_name.clone()),
        }
    }

    /// Rewrite rules in the order they run.
    pub fn stages(&self) -> &[Box<dyn RewriteRule>] {
        &self.stages
    }

    /// Apply the rewrite rules without validating or formatting.
    pub fn rewrite(&self, markup: &str) -> String {
        self.stages.iter().fold(markup.to_string(), |text, rule| {
            let next = rule.apply(&text);
            tracing::trace!(
                "{} ({}): {} -> {} bytes",
                rule.stage(),
                rule.name(),
                text.len(),
                next.len()
            );
            next
        })
    }

    /// Convert SVG markup into component source.
    pub fn convert(&self, source: &str) -> Result<Output, ConvertError> {
        if source.is_empty() {
            return Ok(Output::Empty);
        }

        validate(source)?;

        let body = self.rewrite(source);
        let component = self.template.render(&body);
        tracing::debug!(
            "{}: converted {} bytes into component {}",
            Stage::Format,
            source.len(),
            self.template.name()
        );

        Ok(Output::Component(component))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&ConvertOptions::default())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field(
                "stages",
                &self.stages.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("template", &self.template)
            .finish()
    }
}

/// Convert with default options.
pub fn convert(source: &str) -> Result<Output, ConvertError> {
    Pipeline::default().convert(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn legacy() -> Pipeline {
        Pipeline::new(&ConvertOptions {
            rename_mode: RenameMode::Legacy,
            ..Default::default()
        })
    }

    #[test]
    fn empty_input_is_quiet() {
        assert_eq!(convert("").unwrap(), Output::Empty);
        assert_eq!(convert("").unwrap().as_str(), "");
    }

    #[test]
    fn rejects_markup_without_svg_root() {
        let result = convert(r#"<rect width="1"/>"#);

        assert!(matches!(result, Err(ConvertError::Format)));
    }

    #[test]
    fn whitespace_only_input_is_a_format_error() {
        assert!(matches!(convert("  \n"), Err(ConvertError::Format)));
    }

    #[test]
    fn converts_class_attribute() {
        let out = convert(r#"<svg class="icon"></svg>"#).unwrap();

        assert_eq!(
            out.as_str(),
            "const SvgIcon = () => (\n  <svg className=\"icon\"></svg>\n);\n\nexport default SvgIcon;"
        );
    }

    #[test]
    fn converts_compound_attributes() {
        let out = convert(r#"<svg><rect clip-path="url(#a)" fill-opacity="0.5"/></svg>"#).unwrap();

        assert!(out.as_str().contains(r#"clipPath="url(#a)""#));
        assert!(out.as_str().contains(r#"fillOpacity="0.5""#));
    }

    #[test]
    fn converts_style_attribute() {
        let out = convert(r#"<svg style="fill:red;stroke-width:2px"></svg>"#).unwrap();

        assert!(out
            .as_str()
            .contains(r#"style={{fill: "red", strokeWidth: "2px"}}"#));
    }

    #[test]
    fn converts_namespaced_href() {
        for pipeline in [Pipeline::default(), legacy()] {
            let out = pipeline
                .convert(r##"<svg><use xlink:href="#a"/></svg>"##)
                .unwrap();

            assert!(out.as_str().contains(r##"xlinkHref="#a""##));
        }
    }

    #[test]
    fn output_is_wrapped_in_template() {
        let pipeline = Pipeline::new(&ConvertOptions {
            component_name: "Logo".to_string(),
            ..Default::default()
        });
        let out = pipeline.convert("<svg>\n  <g/>\n</svg>").unwrap();

        assert!(out.as_str().starts_with("const Logo = () => (\n  <svg>"));
        assert!(out.as_str().ends_with("\n);\n\nexport default Logo;"));
    }

    #[test]
    fn conversion_is_deterministic() {
        let source = r#"<svg class="a" style="font-size:2px"><path stroke-linecap="round"/></svg>"#;
        let pipeline = Pipeline::default();

        assert_eq!(
            pipeline.convert(source).unwrap(),
            pipeline.convert(source).unwrap()
        );
    }

    #[test]
    fn stages_run_in_order() {
        let pipeline = Pipeline::default();
        let order: Vec<Stage> = pipeline.stages().iter().map(|s| s.stage()).collect();

        assert_eq!(
            order,
            vec![
                Stage::Style,
                Stage::ClassName,
                Stage::CamelCase,
                Stage::RenameTable
            ]
        );
    }

    #[test]
    fn legacy_mode_mangles_hyphenated_values() {
        let source = r#"<svg><g id="icon-home" style="font-family:sans-serif"/></svg>"#;
        let out = legacy().convert(source).unwrap();

        assert!(out.as_str().contains(r#"id="iconHome""#));
        assert!(out.as_str().contains(r#"fontFamily: "sansSerif""#));
    }

    #[test]
    fn scoped_mode_preserves_hyphenated_values() {
        let source = r#"<svg><g id="icon-home" style="font-family:sans-serif"/></svg>"#;
        let out = convert(source).unwrap();

        assert!(out.as_str().contains(r#"id="icon-home""#));
        assert!(out.as_str().contains(r#"fontFamily: "sans-serif""#));
    }

    #[test]
    fn style_runs_before_generic_renames() {
        // Later stages receive the object form, not the raw attribute.
        let pipeline = Pipeline::default();
        let after_style = pipeline.stages()[0].apply(r#"<svg style="stroke-width:1"></svg>"#);

        assert_eq!(after_style, r#"<svg style={{strokeWidth: "1"}}></svg>"#);
    }

    #[test]
    fn trailing_backslash_in_style_keeps_later_renames() {
        let source = r#"<svg><text style="font-family:a\" stroke-width="2">x</text></svg>"#;
        let out = convert(source).unwrap();

        assert!(out.as_str().contains(r#"style={{fontFamily: "a\"}}"#));
        assert!(out.as_str().contains(r#"strokeWidth="2""#));
    }

    #[test]
    fn malformed_markup_passes_through() {
        let out = convert(r#"<svg><g class="a"</svg>"#).unwrap();

        assert!(out.as_str().contains(r#"<g className="a"</svg>"#));
    }
}
