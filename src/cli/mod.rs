//! # CLI Module
//!
//! Command implementations behind the `sporldash` binary.
//!
//! - [`serve`] - runs the dashboard server (login, charts, CSV download)
//! - [`tracks`] - prints the top tracks in the terminal and optionally
//!   writes the CSV file, using the token cached by `serve --cache-token`
//!
//! ## Usage
//!
//! ```bash
//! sporldash serve --open                        # dashboard in the browser
//! sporldash serve --cache-token                 # ...and keep the login on disk
//! sporldash tracks --time-range long-term       # top tracks of the last year
//! sporldash tracks --csv top_tracks_by_year.csv # export to a file
//! ```
//!
//! Output goes through the crate's `info!`, `success!`, `warning!` and
//! `error!` macros; `error!` terminates the process and is only used for
//! conditions the user has to fix (configuration, missing login).

mod serve;
mod tracks;

pub use serve::serve;
pub use tracks::table_rows;
pub use tracks::tracks;
