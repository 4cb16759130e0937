use crate::domain::model::{AllFieldsCheck, FieldCheck, FieldProbeResult, ProbeTarget};
use serde_json::Value;
use std::fmt::Write;

const YES: &str = "✅ YES";
const NO: &str = "❌ NO";

/// True when the text contains at least one character from the Arabic block (U+0600..=U+06FF).
pub fn contains_arabic_script(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Checks the rendered text, so Arabic inside a many2one pair or list counts too.
fn is_arabic_value(value: &Value) -> bool {
    contains_arabic_script(&display_value(value))
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        YES
    } else {
        NO
    }
}

/// Markdown report for the chat host.
pub fn render_report(result: &FieldProbeResult, target: &ProbeTarget) -> String {
    let label = &target.label;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write!(out, "## {} Field Test Results\n\n", label);
    let _ = write!(out, "**Employee ID:** {}\n\n", result.employee_id);

    match &result.tests.all_available_fields {
        AllFieldsCheck::Passed {
            count,
            has_target_field,
            ..
        } => {
            let _ = writeln!(out, "✅ **All Fields Test:** Found {} readable fields", count);
            let _ = write!(
                out,
                "- {} field present: {}\n\n",
                label,
                yes_no(*has_target_field)
            );

            if *has_target_field {
                let _ = write!(
                    out,
                    "🎉 **Good news!** The `{}` field exists and is readable.\n\n",
                    result.field
                );
            } else {
                let _ = write!(
                    out,
                    "⚠️ **Issue found:** The `{}` field is not available.\n\n",
                    result.field
                );
                let name_fields = result.tests.name_related_fields.as_deref().unwrap_or(&[]);
                if !name_fields.is_empty() {
                    out.push_str("**Name-related fields found:**\n");
                    for field in name_fields {
                        let _ = writeln!(out, "- {}", field);
                    }
                    out.push('\n');
                }
            }
        }
        AllFieldsCheck::Failed { error } => {
            let _ = write!(out, "❌ **All Fields Test Failed:** {}\n\n", error);
        }
    }

    match &result.tests.field_specific {
        FieldCheck::Passed { value, .. } => {
            let _ = writeln!(
                out,
                "✅ **{} Field Specific Test:** Successfully retrieved",
                label
            );
            let _ = writeln!(out, "- Value: `{}`", display_value(value));
            let _ = write!(
                out,
                "- Is Arabic script: {}\n\n",
                yes_no(is_arabic_value(value))
            );
        }
        FieldCheck::Failed { error } => {
            let _ = write!(
                out,
                "❌ **{} Field Specific Test Failed:** {}\n\n",
                label, error
            );
        }
    }

    out.push_str("**Full test results saved to debug info.**\n");
    out.push_str("Enable debug mode to see detailed technical data.");
    out
}
