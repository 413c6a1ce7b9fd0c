use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Overlay, OverlayId, OverlayUpdate, Panel};

/// Number of panels a new four-cut comic starts with
const FOUR_CUT_PANELS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComicFormat {
    #[default]
    #[serde(rename = "4-cut")]
    FourCut,
    #[serde(rename = "continuous")]
    Continuous,
}

impl ComicFormat {
    pub fn all() -> &'static [ComicFormat] {
        &[ComicFormat::FourCut, ComicFormat::Continuous]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ComicFormat::FourCut => "Four-cut",
            ComicFormat::Continuous => "Continuous",
        }
    }

    fn initial_panels(&self) -> u32 {
        match self {
            ComicFormat::FourCut => FOUR_CUT_PANELS,
            ComicFormat::Continuous => 1,
        }
    }
}

/// The comic being edited.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComicData {
    pub title: String,
    #[serde(default)]
    pub format: ComicFormat,
    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Default for ComicData {
    fn default() -> Self {
        Self::new(ComicFormat::default())
    }
}

impl ComicData {
    pub fn new(format: ComicFormat) -> Self {
        Self {
            title: "Untitled Comic".to_string(),
            format,
            panels: (1..=format.initial_panels()).map(Panel::new).collect(),
        }
    }

    pub fn panel(&self, idx: u32) -> Option<&Panel> {
        self.panels.iter().find(|p| p.idx == idx)
    }

    pub fn panel_mut(&mut self, idx: u32) -> Option<&mut Panel> {
        self.panels.iter_mut().find(|p| p.idx == idx)
    }

    pub fn overlay(&self, id: &OverlayId) -> Option<&Overlay> {
        self.panels.iter().find_map(|p| p.overlay(id))
    }

    pub fn overlay_mut(&mut self, id: &OverlayId) -> Option<&mut Overlay> {
        self.panels.iter_mut().find_map(|p| p.overlay_mut(id))
    }

    /// All overlays with the panel that owns them, in panel then z-order.
    pub fn overlays(&self) -> impl Iterator<Item = (&Panel, &Overlay)> {
        self.panels
            .iter()
            .flat_map(|panel| panel.overlays.iter().map(move |overlay| (panel, overlay)))
    }

    /// Apply a partial edit. Returns false if the overlay no longer exists.
    pub fn apply_update(&mut self, id: &OverlayId, update: OverlayUpdate) -> bool {
        match self.overlay_mut(id) {
            Some(overlay) => {
                update.apply(overlay);
                true
            }
            None => false,
        }
    }

    /// Add a hand-placed bubble to panel `idx`.
    pub fn add_overlay(&mut self, panel_idx: u32) -> Option<OverlayId> {
        let speaker = self.first_speaker();
        self.panel_mut(panel_idx)
            .map(|panel| panel.add_overlay(speaker))
    }

    pub fn delete_overlay(&mut self, id: &OverlayId) -> bool {
        self.panels
            .iter_mut()
            .any(|panel| panel.remove_overlay(id).is_some())
    }

    pub fn regenerate_overlays(&mut self, panel_idx: u32) -> Option<usize> {
        self.panel_mut(panel_idx)
            .map(|panel| panel.regenerate_overlays())
    }

    /// Lay out bubbles from the dialogue of a fresh script: only runs when no
    /// panel with dialogue has overlays yet. Returns how many panels were filled.
    pub fn populate_missing_overlays(&mut self) -> usize {
        let already_laid_out = self
            .panels
            .iter()
            .any(|p| !p.dialogue.is_empty() && !p.overlays.is_empty());
        if already_laid_out {
            return 0;
        }

        let mut filled = 0;
        for panel in &mut self.panels {
            if !panel.dialogue.is_empty() {
                panel.regenerate_overlays();
                filled += 1;
            }
        }
        filled
    }

    /// The first speaker named anywhere in the script, or empty.
    pub fn first_speaker(&self) -> String {
        self.panels
            .iter()
            .flat_map(|p| p.dialogue.iter())
            .map(|line| line.by.trim())
            .find(|by| !by.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    pub fn add_panel(&mut self) -> u32 {
        let idx = self.panels.iter().map(|p| p.idx).max().unwrap_or(0) + 1;
        self.panels.push(Panel::new(idx));
        idx
    }

    /// Remove the last panel, keeping at least one.
    pub fn remove_last_panel(&mut self) -> Option<Panel> {
        if self.panels.len() <= 1 {
            return None;
        }
        self.panels.pop()
    }

    /// Sort panels, renumber them 1..n, and normalize every overlay.
    pub fn normalize(&mut self) {
        self.panels.sort_by_key(|p| p.idx);
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.idx = i as u32 + 1;
            panel.normalize();
        }
    }
}

/// Version written into new comic files
pub const COMIC_FILE_VERSION: u32 = 1;

fn legacy_version() -> u32 {
    COMIC_FILE_VERSION
}

/// On-disk form of a comic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedComic {
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(flatten)]
    pub comic: ComicData,
}

impl SavedComic {
    pub fn from_comic(comic: &ComicData) -> Self {
        Self {
            version: COMIC_FILE_VERSION,
            comic: comic.clone(),
        }
    }
}
