use serde_json::Value;

use crate::{
    dashboard::{Dashboard, charts, export::CSV_FILE_NAME},
    types::TimeRange,
    utils::escape_html,
};

const TITLE: &str = "Your personal Spotify year in review";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;color:#191414}\
h1{font-size:1.8rem}h2{margin-top:2.5rem;font-size:1.3rem}\
table{border-collapse:collapse;width:100%}th,td{text-align:left;padding:.35rem .6rem;border-bottom:1px solid #ddd}\
.notice{background:#fff4d6;border:1px solid #e8c766;padding:.6rem 1rem;border-radius:4px}\
.error{background:#fde2e2;border:1px solid #e08a8a;padding:.6rem 1rem;border-radius:4px}\
a.button{display:inline-block;background:#1db954;color:#fff;padding:.6rem 1.2rem;border-radius:2rem;text-decoration:none}\
nav{display:flex;justify-content:space-between;align-items:center}";

fn layout(body: &str, with_charts: bool) -> String {
    let script = if with_charts {
        format!(r#"<script src="{}" charset="utf-8"></script>"#, PLOTLY_CDN)
    } else {
        String::new()
    };

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title}</title>\n<style>{style}</style>\n{script}\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = TITLE,
        style = STYLE,
        script = script,
        body = body
    )
}

/// Serializes a figure for embedding in an inline `<script>`.
fn figure_json(figure: &Value) -> String {
    // `</script>` inside a string literal would end the script element
    figure.to_string().replace("</", "<\\/")
}

fn chart(id: &str, figure: &Value) -> String {
    format!(
        "<div id=\"{id}\"></div>\n<script>(function(){{var f={json};\
Plotly.newPlot(\"{id}\",f.data,f.layout,{{responsive:true}});}})();</script>",
        id = id,
        json = figure_json(figure)
    )
}

fn time_range_form(selected: TimeRange) -> String {
    let options: String = TimeRange::ALL
        .iter()
        .map(|r| {
            format!(
                "<option value=\"{value}\"{selected}>{label} ({value})</option>",
                value = r.as_str(),
                label = r.label(),
                selected = if *r == selected { " selected" } else { "" }
            )
        })
        .collect();

    format!(
        "<form method=\"get\" action=\"/\"><label>Time range \
<select name=\"time_range\" onchange=\"this.form.submit()\">{}</select></label> \
<noscript><button type=\"submit\">Show</button></noscript></form>",
        options
    )
}

/// Page shown whenever no valid token is available.
pub fn login_page(notice: Option<&str>) -> String {
    let notice = notice
        .map(|n| format!("<p class=\"notice\">{}</p>", escape_html(n)))
        .unwrap_or_default();

    layout(
        &format!(
            "<h1>{title}</h1>\n{notice}\n<p>Log in with your Spotify account to see your \
top tracks, favourite genres and the release years of your top songs.</p>\n\
<p><a class=\"button\" href=\"/login\">Log in with Spotify</a></p>",
            title = TITLE,
            notice = notice
        ),
        false,
    )
}

/// Page shown when a render fails for reasons other than authentication.
pub fn error_page(message: &str) -> String {
    layout(
        &format!(
            "<h1>{title}</h1>\n<p class=\"error\">{message}</p>\n\
<p><a href=\"/\">Reload</a></p>",
            title = TITLE,
            message = escape_html(message)
        ),
        false,
    )
}

pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let rows: String = dashboard
        .records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td></tr>",
                escape_html(&r.name),
                r.popularity
            )
        })
        .collect();

    let genres = if dashboard.genres.is_empty() {
        "<p>Spotify has no genres for your top artists in this time range.</p>".to_string()
    } else {
        chart("genres", &charts::genre_pie(&dashboard.genres))
    };

    let body = format!(
        "<nav><h1>{title}</h1><a href=\"/logout\">Log out</a></nav>\n{form}\n\
<h2>Your top tracks</h2>\n<table><thead><tr><th>Track</th><th>Popularity</th></tr></thead>\
<tbody>{rows}</tbody></table>\n{popularity}\n\
<h2>Distribution of your favourite genres</h2>\n{genres}\n\
<h2>Release years of your top songs: old school or charts?</h2>\n{years}\n\
<p><a class=\"button\" href=\"/export.csv?time_range={range}\" download=\"{file}\">\
Download song data as CSV</a></p>",
        title = TITLE,
        form = time_range_form(dashboard.time_range),
        rows = rows,
        popularity = chart("popularity", &charts::popularity_bar(&dashboard.records)),
        genres = genres,
        years = chart(
            "release-years",
            &charts::release_year_histogram(&dashboard.records, &dashboard.years)
        ),
        range = dashboard.time_range.as_str(),
        file = CSV_FILE_NAME
    );

    layout(&body, true)
}
