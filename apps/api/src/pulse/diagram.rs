use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::RAW_OUTPUT_SYSTEM;
use crate::llm_client::LlmClient;
use crate::pulse::brief::BriefOutline;
use crate::pulse::prompts::DIAGRAM_PROMPT;

/// Cuts model output down to the `<svg>...</svg>` span, dropping fences and prose.
/// Returns `None` when there is no complete SVG element.
pub fn extract_svg(raw: &str) -> Option<&str> {
    let start = raw.find("<svg")?;
    let end = raw.rfind("</svg>")? + "</svg>".len();
    (end > start).then(|| &raw[start..end])
}

fn build_prompt(customer_name: &str, brief: &BriefOutline) -> String {
    DIAGRAM_PROMPT
        .replace("{name}", customer_name)
        .replace("{headline}", &brief.headline)
        .replace("{context}", &brief.context)
        .replace("{strategy}", &brief.strategy)
        .replace("{actions}", &brief.actions.join(", "))
}

pub async fn generate_diagram(
    llm: &LlmClient,
    customer_name: &str,
    brief: &BriefOutline,
) -> Result<String, AppError> {
    let raw = llm
        .call_text(&build_prompt(customer_name, brief), RAW_OUTPUT_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Diagram generation failed: {e}")))?;

    let svg = extract_svg(&raw)
        .ok_or_else(|| AppError::Llm("Diagram response contained no <svg> element".to_string()))?;
    info!("Generated {}-byte architecture diagram for {customer_name}", svg.len());
    Ok(svg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_svg_strips_fences_and_prose() {
        let raw = "Here you go:\n```svg\n<svg viewBox=\"0 0 10 10\"><rect/></svg>\n```\nEnjoy!";
        assert_eq!(extract_svg(raw), Some("<svg viewBox=\"0 0 10 10\"><rect/></svg>"));
    }

    #[test]
    fn test_extract_svg_keeps_nested_svg() {
        let raw = "<svg><svg id=\"inner\"></svg></svg>";
        assert_eq!(extract_svg(raw), Some(raw));
    }

    #[test]
    fn test_extract_svg_rejects_incomplete_output() {
        assert_eq!(extract_svg("<svg viewBox=\"0 0 10 10\">"), None);
        assert_eq!(extract_svg("no diagram today"), None);
        assert_eq!(extract_svg("</svg> then <svg"), None);
    }

    #[test]
    fn test_prompt_lists_actions() {
        let brief = BriefOutline {
            headline: "Pilot at risk".to_string(),
            context: "ctx".to_string(),
            strategy: "Deploy Priya".to_string(),
            actions: vec!["One".to_string(), "Two".to_string()],
        };
        let prompt = build_prompt("Helios Grid", &brief);
        assert!(prompt.contains("\"Helios Grid\""));
        assert!(prompt.contains("Actions: One, Two"));
    }
}
