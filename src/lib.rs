//! manual-sitemap: chapter indexing, navigation and boolean filtering for long manuals.
//!
//! A manual is a sequence of sections. The first section holding a navigation region hosts the
//! table of contents; every heading after it becomes a numbered chapter with an alias. The
//! [`sitemap`] module builds that index, [`navigator`] resolves chapter references against it,
//! [`filter`] evaluates boolean full-text queries over chapter text, and [`manual`] ties the
//! three to a [`view::DocumentView`].
//!
//! ```
//! use manual_sitemap::manual::ManualDocument;
//! use manual_sitemap::section::{DocumentTree, Heading, Section};
//! use manual_sitemap::view::ViewModel;
//! use std::time::{Duration, Instant};
//!
//! let tree = DocumentTree::new(vec![
//!     Section::nav(),
//!     Section::with_headings(vec![
//!         Heading::new(1, "Intro", ""),
//!         Heading::new(2, "Setup", ""),
//!     ]),
//! ]);
//! let mut manual = ManualDocument::new(&tree, Duration::from_millis(250));
//! let mut view = ViewModel::for_sitemap(manual.sitemap());
//! manual.navigate("1.1");
//! manual.flush(&mut view, Instant::now());
//! assert_eq!(view.fragment(), Some("IntroSetup"));
//! ```

pub mod app_state;
pub mod config;
pub mod error;
pub mod filter;
pub mod formats;
pub mod input;
pub mod manual;
pub mod navigator;
pub mod normalize;
pub mod section;
pub mod sitemap;
pub mod ui;
pub mod view;
