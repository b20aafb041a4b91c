/// Trigger words and the franchise searches they add
///
/// Matching is substring-based on the lower-cased plot, so "car" also fires on
/// "scary". That's acceptable: every extra result still goes through the quality
/// filter and the ranking step.
const FRANCHISE_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &["magic", "wizard", "school"],
        &["harry potter", "fantastic beasts"],
    ),
    (
        &["superhero", "marvel", "hero"],
        &["avengers", "iron man", "spider-man", "batman", "superman"],
    ),
    (&["space", "galaxy", "jedi"], &["star wars"]),
    (&["fast", "car", "racing"], &["fast furious"]),
];

/// Extra search keywords for well-known franchises the plot hints at
pub fn franchise_keywords(plot_description: &str) -> Vec<&'static str> {
    let plot = plot_description.to_lowercase();

    FRANCHISE_GROUPS
        .iter()
        .filter(|(triggers, _)| triggers.iter().any(|t| plot.contains(t)))
        .flat_map(|(_, keywords)| keywords.iter().copied())
        .collect()
}
