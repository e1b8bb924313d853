#![forbid(unsafe_code)]

//! Scheme derivation for tintbar: turn a weighted wallpaper palette
//! into a small, internally-consistent set of UI chrome colors.
//!
//! # Role in tintbar
//! This crate is the engine. The caller quantizes a wallpaper into a
//! weighted 12-color [`Palette`] (outside this crate), picks a
//! [`ThemeKind`] and [`Mode`], and gets back a [`ChromeScheme`]: accent,
//! menu surfaces, bar surface, borders, and highlights, each chosen so
//! the set works together.
//!
//! # How a derivation runs
//! Roles are filled strictly in sequence — accent, menu background,
//! sub-menu background, bar background, then decoration — and every
//! pick is removed from the shared candidate pool, so no two roles ever
//! land on the same palette entry. Selection is a greedy, order-
//! dependent allocation, not a joint optimization; each role scores the
//! remaining candidates against its theme targets and prefers the best
//! one satisfying the strict bounds, falling back to looser bounds and
//! finally to the least-bad candidate, so every role is always
//! assigned. Chosen colors are then refined toward theme windows and
//! pushed apart when they collide perceptually.
//!
//! # Guarantees
//! Derivation is synchronous, deterministic, and total: same palette,
//! theme, and mode give a bit-identical scheme, with every channel in
//! range, for any valid palette. The only fallible operation in the
//! crate is [`Palette::new`].
//!
//! # Example
//! ```
//! use tintbar_scheme::{derive, Mode, Palette, Rgb, SchemeOptions, ThemeKind, WeightedColor};
//!
//! let entries = (0u8..12)
//!     .map(|i| WeightedColor::new(Rgb::new(i * 20, 100, 200 - i * 10), 100.0 / 12.0))
//!     .collect();
//! let palette = Palette::new(entries).unwrap();
//! let scheme = derive(&palette, &SchemeOptions::new(ThemeKind::Dark, Mode::Dark));
//! println!("{scheme}");
//! ```

use std::fmt;

use tracing::debug;

/// Decoration pass: borders and highlights.
mod decor;
/// Weighted palette input and the working candidate pool.
pub mod palette;
/// Per-theme constant tables.
pub mod profile;
/// Post-selection refinement.
mod refine;
/// The sequential role selector.
mod select;

pub use palette::{PALETTE_LEN, Palette, PaletteError, WeightedColor};
pub use profile::{
    DecorTargets, Mode, PairBounds, RefineWindow, RoleTargets, ScoreWeights, ThemeKind,
    ThemeProfile,
};
pub use tintbar_color::Rgb;

use decor::{boost_neon, derive_highlight, select_bar_border, select_menu_border};
use palette::CandidatePool;
use refine::{evade_backgrounds, order_surfaces, refine_role, separate_surfaces};
use select::{RoleSpec, select_role};

/// Options for one derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SchemeOptions {
    pub kind: ThemeKind,
    pub mode: Mode,
    /// Caller-supplied accent; bypasses accent selection (the pool
    /// stays full) but not accent refinement.
    pub accent_override: Option<Rgb>,
    /// Prefer a saturated, banded-lightness bar border.
    pub neon: bool,
}

impl SchemeOptions {
    /// Options for a theme kind and mode, no override, neon off.
    #[must_use]
    pub const fn new(kind: ThemeKind, mode: Mode) -> Self {
        Self { kind, mode, accent_override: None, neon: false }
    }

    /// Supply the accent directly (builder pattern).
    #[must_use]
    pub const fn with_accent_override(mut self, accent: Rgb) -> Self {
        self.accent_override = Some(accent);
        self
    }

    /// Toggle the neon bar-border rule (builder pattern).
    #[must_use]
    pub const fn with_neon(mut self, neon: bool) -> Self {
        self.neon = neon;
        self
    }
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self::new(ThemeKind::Dark, Mode::Dark)
    }
}

/// The derived chrome colors. Fixed shape, constructed once per
/// derivation, never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChromeScheme {
    pub accent: Rgb,
    pub menu_bg: Rgb,
    pub sub_menu_bg: Rgb,
    pub bar_bg: Rgb,
    pub bar_border: Rgb,
    pub bar_highlight: Rgb,
    pub menu_border: Rgb,
    pub menu_highlight: Rgb,
}

impl ChromeScheme {
    /// All roles with their names, in derivation order.
    #[must_use]
    pub fn roles(&self) -> [(&'static str, Rgb); 8] {
        [
            ("accent", self.accent),
            ("menu_bg", self.menu_bg),
            ("sub_menu_bg", self.sub_menu_bg),
            ("bar_bg", self.bar_bg),
            ("bar_border", self.bar_border),
            ("bar_highlight", self.bar_highlight),
            ("menu_border", self.menu_border),
            ("menu_highlight", self.menu_highlight),
        ]
    }
}

impl fmt::Display for ChromeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, color) in self.roles() {
            writeln!(f, "{name}: {}", color.to_hex())?;
        }
        Ok(())
    }
}

/// Derive a chrome scheme from a weighted palette.
///
/// Pure and deterministic: no I/O, no shared state, same inputs give a
/// bit-identical scheme. One call costs O(roles × 12) candidate
/// evaluations.
#[must_use]
pub fn derive(palette: &Palette, options: &SchemeOptions) -> ChromeScheme {
    let kind = options.kind;
    let profile = ThemeProfile::resolve(kind, options.mode);
    let mut pool = CandidatePool::from_palette(palette, profile.prominent_min);
    debug!(?kind, mode = ?options.mode, prominent = pool.prominent().len(), "deriving scheme");

    // Accent: from the prominent prefix, or supplied by the caller (in
    // which case the pool keeps all twelve entries).
    let accent_raw = match options.accent_override {
        Some(color) => color,
        None => {
            let spec = RoleSpec {
                name: "accent",
                targets: &profile.accent,
                weights: &profile.accent_weights,
                pair: None,
                chosen: &[],
            };
            let index = select_role(pool.prominent(), &spec);
            pool.take(index).color
        }
    };
    let mut accent = if kind == ThemeKind::TrueColor {
        accent_raw
    } else {
        refine_role(accent_raw, &profile.accent_refine, kind)
    };

    // Menu background, then sub-menu background, both from the
    // prominent prefix, each constrained against everything chosen so
    // far.
    let chosen = [accent];
    let spec = RoleSpec {
        name: "menu_bg",
        targets: &profile.menu,
        weights: &profile.menu_weights,
        pair: Some(&profile.menu_pair),
        chosen: &chosen,
    };
    let index = select_role(pool.prominent(), &spec);
    let menu_raw = pool.take(index).color;

    let chosen = [accent, menu_raw];
    let spec = RoleSpec {
        name: "sub_menu_bg",
        targets: &profile.sub_menu,
        weights: &profile.sub_menu_weights,
        pair: Some(&profile.sub_menu_pair),
        chosen: &chosen,
    };
    let index = select_role(pool.prominent(), &spec);
    let sub_menu_raw = pool.take(index).color;

    let (menu_refined, sub_menu_refined) = if kind == ThemeKind::TrueColor {
        (menu_raw, sub_menu_raw)
    } else {
        (
            refine_role(menu_raw, &profile.menu_refine, kind),
            refine_role(sub_menu_raw, &profile.sub_menu_refine, kind),
        )
    };

    // Hold the surfaces apart, then put them in the theme family's
    // preferred order (separation first: it can reorder a near-tie, the
    // swap must have the last word), and move the accent out of their
    // way.
    let (menu_bg, sub_menu_bg) = separate_surfaces(menu_refined, sub_menu_refined);
    let (menu_bg, sub_menu_bg) = order_surfaces(menu_bg, sub_menu_bg, kind);
    accent = evade_backgrounds(accent, menu_bg, sub_menu_bg, profile.evade_push);

    // Bar background draws on the full remaining pool, not just the
    // prominent prefix.
    let chosen = [accent, menu_bg];
    let spec = RoleSpec {
        name: "bar_bg",
        targets: &profile.bar,
        weights: &profile.bar_weights,
        pair: Some(&profile.bar_pair),
        chosen: &chosen,
    };
    let index = select_role(pool.all(), &spec);
    let bar_bg = pool.take(index).color;

    // Decoration: bar border with the neon rule, menu border as the
    // plain lightness extreme, highlights derived from the borders.
    let pick = select_bar_border(pool.all(), options.mode, &profile.decor, options.neon);
    let mut bar_border = pool.take(pick.index).color;
    if pick.from_fallback && bar_border.to_hsl().s < profile.decor.neon_sat_floor {
        bar_border = boost_neon(bar_border);
    }

    let index = select_menu_border(pool.all(), options.mode);
    let menu_border = pool.take(index).color;

    ChromeScheme {
        accent,
        menu_bg,
        sub_menu_bg,
        bar_bg,
        bar_border,
        bar_highlight: derive_highlight(bar_border, options.mode),
        menu_border,
        menu_highlight: derive_highlight(menu_border, options.mode),
    }
}
