use rand::{Rng, distr::Alphanumeric};

/// Length of the anti-forgery `state` sent with every login link.
pub const LOGIN_STATE_LEN: usize = 64;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(LOGIN_STATE_LEN)
        .map(char::from)
        .collect()
}

/// Parses the release year from a Spotify release date.
///
/// Spotify reports dates with `year`, `month` or `day` precision
/// (`1987`, `1987-06`, `1987-06-22`); the year is always the first four
/// characters.
pub fn parse_release_year(release_date: &str) -> Option<i32> {
    release_date.get(..4)?.parse::<i32>().ok()
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
