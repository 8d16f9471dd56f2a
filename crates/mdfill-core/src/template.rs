//! Template store
//!
//! Holds the active markup template. A template is plain lightweight
//! markup with `{{identifier}}` placeholders marking substitution sites.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a `{{identifier}}` placeholder, capturing the identifier
pub(crate) static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("placeholder pattern is valid")
});

/// Built-in project report template
pub const DEFAULT_TEMPLATE: &str = r#"# {{document_title}}

## Executive Summary
{{executive_summary}}

## Project Information
- **Project Name:** {{project_name}}
- **Project Manager:** {{project_manager}}
- **Start Date:** {{start_date}}
- **End Date:** {{end_date}}
- **Status:** {{project_status}}

## Objectives
{{project_objectives}}

## Scope
### In Scope
{{in_scope_items}}

### Out of Scope
{{out_scope_items}}

## Stakeholders
| Name | Role | Contact | Responsibility |
|------|------|---------|----------------|
{{stakeholder_table}}

## Timeline
{{timeline_section}}

## Budget
- **Total Budget:** {{total_budget}}
- **Spent to Date:** {{spent_amount}}
- **Remaining:** {{remaining_budget}}

### Budget Breakdown
{{budget_breakdown}}

## Risks and Mitigation
{{risks_section}}

## Key Deliverables
{{deliverables_list}}

## Success Metrics
{{success_metrics}}

## Additional Notes
{{additional_notes}}

---
*Document generated on: {{generation_date}}*
*Prepared by: {{prepared_by}}*
"#;

/// Holds the single active template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateStore {
    template: String,
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateStore {
    /// Create a store holding [`DEFAULT_TEMPLATE`]
    pub fn new() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Create a store holding a custom template
    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Replace the active template. Placeholder syntax is not validated.
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    /// The active template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Distinct placeholder identifiers in the active template
    pub fn placeholders(&self) -> BTreeSet<String> {
        placeholders(&self.template)
    }
}

/// Distinct placeholder identifiers found in `template`
pub fn placeholders(template: &str) -> BTreeSet<String> {
    PLACEHOLDER
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
