/// Most titles kept from one suggestion completion
pub const MAX_SUGGESTED_TITLES: usize = 15;

/// Lines at or below this many characters are noise, not titles
const MIN_TITLE_CHARS: usize = 2;

const BULLETS: [char; 3] = ['-', '*', '•'];

/// Turns a "one `Title (Year)` per line" completion into clean search titles
pub fn extract_titles(completion: &str) -> Vec<String> {
    completion
        .lines()
        .map(clean_line)
        .filter(|title| title.chars().count() > MIN_TITLE_CHARS)
        .take(MAX_SUGGESTED_TITLES)
        .collect()
}

fn clean_line(line: &str) -> String {
    let line = strip_list_marker(line.trim());
    strip_years(line).trim().to_string()
}

/// Removes a leading bullet (`-`, `*`, `•`, spaced or not) and/or a number marker (`1.`, `12)`)
///
/// A number followed only by a space stays, so "12 Angry Men" keeps its digits.
fn strip_list_marker(line: &str) -> &str {
    let mut rest = line;

    if let Some(after) = rest.strip_prefix(BULLETS) {
        rest = after.trim_start();
    }

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(after) = rest[digits..].strip_prefix(['.', ')']) {
            rest = after.trim_start();
        }
    }

    rest
}

/// Removes every `(dddd)` year parenthetical
fn strip_years(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find('(') {
        let candidate = &rest[start..];
        let is_year = candidate.len() >= 6
            && candidate.as_bytes()[1..5].iter().all(u8::is_ascii_digit)
            && candidate.as_bytes()[5] == b')';

        if is_year {
            out.push_str(&rest[..start]);
            rest = &candidate[6..];
        } else {
            out.push_str(&rest[..=start]);
            rest = &candidate[1..];
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_with_years() {
        let titles = extract_titles("Shrek (2001)\nShrek 2 (2004)\nShrek the Third (2007)");
        assert_eq!(titles, vec!["Shrek", "Shrek 2", "Shrek the Third"]);
    }

    #[test]
    fn test_numbered_and_bulleted_lists() {
        let completion = "1. Harry Potter and the Philosopher's Stone (2001)\n\
                          2) Harry Potter and the Chamber of Secrets (2002)\n\
                          - Fantastic Beasts and Where to Find Them (2016)\n\
                          • The Worst Witch (1986)\n\
                          * Matilda (1996)\n\
                          - 3. The Sorcerer's Apprentice (2010)";

        let titles = extract_titles(completion);
        assert_eq!(
            titles,
            vec![
                "Harry Potter and the Philosopher's Stone",
                "Harry Potter and the Chamber of Secrets",
                "Fantastic Beasts and Where to Find Them",
                "The Worst Witch",
                "Matilda",
                "The Sorcerer's Apprentice",
            ]
        );
    }

    #[test]
    fn test_unspaced_bullets_stripped() {
        let titles = extract_titles("•Shrek (2001)\n-Shrek 2 (2004)\n*Shrek the Third (2007)\n-1. Puss in Boots (2011)");
        assert_eq!(
            titles,
            vec!["Shrek", "Shrek 2", "Shrek the Third", "Puss in Boots"]
        );
    }

    #[test]
    fn test_titles_starting_with_numbers_survive() {
        let titles = extract_titles("12 Angry Men (1957)\n1917 (2019)\n2001: A Space Odyssey (1968)");
        assert_eq!(titles, vec!["12 Angry Men", "1917", "2001: A Space Odyssey"]);
    }

    #[test]
    fn test_short_and_blank_lines_dropped() {
        let titles = extract_titles("\n  \nUp\n-\n(2009)\nIt (2017)\nHer (2013)\n");
        assert_eq!(titles, vec!["Her"]);
    }

    #[test]
    fn test_caps_at_fifteen() {
        let completion: String = (1..=20)
            .map(|i| format!("{}. Movie Number {} (20{:02})\n", i, i, i))
            .collect();

        let titles = extract_titles(&completion);
        assert_eq!(titles.len(), MAX_SUGGESTED_TITLES);
        assert_eq!(titles[0], "Movie Number 1");
        assert_eq!(titles[14], "Movie Number 15");
    }

    #[test]
    fn test_empty_completion() {
        assert!(extract_titles("").is_empty());
    }

    #[test]
    fn test_non_year_parentheticals_kept() {
        let titles = extract_titles("Dune (Part Two) (2024)\nAlien (79)");
        assert_eq!(titles, vec!["Dune (Part Two)", "Alien (79)"]);
    }

    #[test]
    fn test_no_marker_or_year_survives() {
        let completion = "1. Up (2009)\n10. Inside Out (2015)\n- Coco (2017)\n• Soul (2020) (2021)\n•Luca (2021)\n-Elio (2025)";
        for title in extract_titles(completion) {
            assert!(!title.starts_with(|c: char| c.is_ascii_digit() || BULLETS.contains(&c)));
            assert!(!title.contains("(20"));
        }
    }

    #[test]
    fn test_multibyte_text_is_safe() {
        let titles = extract_titles("Amélie (2001)\n千と千尋の神隠し (2001)\n(漢字)");
        assert_eq!(titles, vec!["Amélie", "千と千尋の神隠し", "(漢字)"]);
    }
}
