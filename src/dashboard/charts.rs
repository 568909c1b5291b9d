//! Plotly figure descriptions.
//!
//! The server never draws anything itself. Each function returns a
//! `{ "data": [...], "layout": {...} }` document that plotly.js renders in
//! the browser.

use serde_json::{Value, json};

use crate::types::{GenreCount, TrackRecord, YearBucket};

pub const POPULARITY_TITLE: &str = "Popularity of your top tracks";
pub const GENRES_TITLE: &str = "Your most frequent genres";
pub const RELEASE_YEARS_TITLE: &str = "Release years of your top songs";

/// Horizontal bar chart, one bar per track, colored by popularity.
pub fn popularity_bar(records: &[TrackRecord]) -> Value {
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let popularity: Vec<u32> = records.iter().map(|r| r.popularity).collect();

    json!({
        "data": [{
            "type": "bar",
            "orientation": "h",
            "x": popularity,
            "y": names,
            "marker": {
                "color": popularity,
                "colorscale": "Viridis",
                "showscale": true,
                "colorbar": { "title": { "text": "Popularity" } }
            },
            "hovertemplate": "%{y}<br>Popularity: %{x}<extra></extra>"
        }],
        "layout": {
            "title": { "text": POPULARITY_TITLE },
            "height": 400,
            "xaxis": { "title": { "text": "Popularity" }, "range": [0, 100] },
            // first track on top
            "yaxis": { "title": { "text": "Track" }, "autorange": "reversed" },
            "margin": { "l": 200 }
        }
    })
}

/// Donut chart of the most frequent genres.
pub fn genre_pie(genres: &[GenreCount]) -> Value {
    let labels: Vec<&str> = genres.iter().map(|g| g.genre.as_str()).collect();
    let values: Vec<usize> = genres.iter().map(|g| g.count).collect();

    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
            "hole": 0.4,
            "sort": false
        }],
        "layout": {
            "title": { "text": GENRES_TITLE },
            "height": 400
        }
    })
}

/// Plotly's default qualitative palette, cycled over the release years.
const YEAR_COLORS: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Histogram of release years with one bin per distinct year.
///
/// Every year is its own trace, so each bar gets its own color and a legend
/// entry.
pub fn release_year_histogram(records: &[TrackRecord], buckets: &[YearBucket]) -> Value {
    let traces: Vec<Value> = buckets
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            let years: Vec<i32> = records
                .iter()
                .map(|r| r.release_year)
                .filter(|year| *year == bucket.year)
                .collect();
            let year = f64::from(bucket.year);

            json!({
                "type": "histogram",
                "name": bucket.year.to_string(),
                "x": years,
                "xbins": { "start": year - 0.5, "end": year + 0.5, "size": 1 },
                "marker": { "color": YEAR_COLORS[i % YEAR_COLORS.len()] },
                "hovertemplate": "%{x}: %{y} track(s)<extra></extra>"
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": RELEASE_YEARS_TITLE },
            "height": 400,
            "barmode": "stack",
            "bargap": 0.1,
            "legend": { "title": { "text": "Release Year" } },
            "xaxis": { "title": { "text": "Release Year" }, "dtick": 1 },
            "yaxis": { "title": { "text": "Tracks" } }
        }
    })
}
