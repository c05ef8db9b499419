/// Prompt and seed-weight text helpers
///
/// Negative prompts are written inline as bracketed segments:
/// `a castle [fog] at dusk [blurry]` has the positive prompt
/// `a castle  at dusk` and the negative prompt `fog blurry`.
use super::data::{Prompt, SeedWeight};

/// Flatten a metadata prompt into the text the prompt input shows
pub fn prompt_to_string(prompt: &Prompt) -> String {
    match prompt {
        Prompt::Text(text) => text.clone(),
        Prompt::Weighted(parts) if parts.len() == 1 => parts[0].prompt.clone(),
        Prompt::Weighted(parts) => parts
            .iter()
            .map(|p| format!("{}:{}", p.prompt, p.weight))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Split a prompt into (positive, negative).
///
/// The negative part is every bracketed segment joined with a space, or the
/// empty string when there is none.
pub fn split_prompt(prompt: &Prompt) -> (String, String) {
    split_negative(&prompt_to_string(prompt))
}

/// Split combined prompt text into (positive, negative)
pub fn split_negative(text: &str) -> (String, String) {
    let segments = bracketed_segments(text);
    if segments.is_empty() {
        return (text.to_string(), String::new());
    }

    let negative = segments
        .iter()
        .filter(|segment| !segment.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    let mut positive = text.to_string();
    for segment in &segments {
        positive = positive
            .replacen(&format!("[{segment}]"), "", 1)
            .replace("[]", "")
            .trim()
            .to_string();
    }

    (positive, negative)
}

/// Contents of every innermost `[...]` group, in order
fn bracketed_segments(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut open: Option<usize> = None;

    for (i, c) in text.char_indices() {
        match c {
            '[' => open = Some(i + 1),
            ']' => {
                if let Some(start) = open.take() {
                    segments.push(&text[start..i]);
                }
            }
            _ => {}
        }
    }

    segments
}

/// Render seed weights as `seed:weight,seed:weight`
pub fn seed_weights_to_string(weights: &[SeedWeight]) -> String {
    weights
        .iter()
        .map(|w| format!("{}:{}", w.seed, w.weight))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse `seed:weight,seed:weight`. Returns None if any pair is malformed.
pub fn parse_seed_weights(text: &str) -> Option<Vec<SeedWeight>> {
    text.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (seed, weight) = pair.split_once(':')?;
            Some(SeedWeight {
                seed: seed.trim().parse().ok()?,
                weight: weight.trim().parse().ok()?,
            })
        })
        .collect()
}
