// Prompts for the pulse service. Placeholders are `{name}`-style and filled with
// `str::replace` by the caller.

/// Summarizes the newest RSS item about an account into a NewsSignal.
pub const NEWS_SIGNAL_PROMPT: &str = r#"You are a Senior Strategic Sales Analyst for Google Cloud.

Target Account: "{company}"
Real-time Update Context: {context}

Task: Analyze this specific news item (or general company status if no news) for a "Real-time Pulse" update.

Return a JSON object with:
1. "headline": the actual news headline (cleaned up) or a summary of the situation.
2. "category": one of ["Expansion", "AI/ML Launch", "Funding", "Leadership", "Partnership", "Risk", "General"].
3. "relevance": a 1-sentence strategic interpretation for a Google Cloud sales rep.
4. "sentiment": "positive", "neutral", or "negative".
5. "link": "{link}" (pass this through exactly if available).

Keep it professional, concise, and actionable."#;

/// Context line used when the RSS feed has no item for the company.
pub const NO_NEWS_CONTEXT: &str = "No recent specific news items found in public RSS.";

/// Asks for a standalone SVG architecture diagram for a brief.
pub const DIAGRAM_PROMPT: &str = r#"You are an expert Cloud Architect and System Designer.
Create a technical architecture diagram for the customer "{name}" based on the following intelligence brief:

Headline: {headline}
Context: {context}
Strategy: {strategy}
Actions: {actions}

The diagram should visually represent the proposed solution/strategy.

OUTPUT RULES:
- Generate ONLY the raw SVG code for the diagram.
- Start directly with <svg ... and end with </svg>.
- Make the SVG responsive (use viewBox, width="100%").
- Use a clean, modern palette suited to a dark glassmorphic UI: light strokes and text, transparent background.
- Include boxes for key components (e.g. "Legacy System", "AI Model", "Cloud Infrastructure", "Data Pipeline").
- Use arrows to show data flow or relationships."#;
