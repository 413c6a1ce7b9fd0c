use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Overlay, OverlayId};

/// One line of the script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    pub by: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanelAspect {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    Landscape,
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "3:4")]
    Portrait,
    #[serde(rename = "9:16")]
    Tall,
}

impl PanelAspect {
    pub fn all() -> &'static [PanelAspect] {
        &[
            PanelAspect::Square,
            PanelAspect::Landscape,
            PanelAspect::Wide,
            PanelAspect::Portrait,
            PanelAspect::Tall,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PanelAspect::Square => "1:1 (square)",
            PanelAspect::Landscape => "4:3 (landscape)",
            PanelAspect::Wide => "16:9 (wide)",
            PanelAspect::Portrait => "3:4 (portrait)",
            PanelAspect::Tall => "9:16 (tall)",
        }
    }

    /// Width over height.
    pub fn ratio(&self) -> f32 {
        match self {
            PanelAspect::Square => 1.0,
            PanelAspect::Landscape => 4.0 / 3.0,
            PanelAspect::Wide => 16.0 / 9.0,
            PanelAspect::Portrait => 3.0 / 4.0,
            PanelAspect::Tall => 9.0 / 16.0,
        }
    }
}

/// A comic panel and the overlays drawn on it. Overlay order is z-order
/// (last is on top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    /// 1-based position in the comic
    pub idx: u32,
    #[serde(default)]
    pub scene: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub dialogue: Vec<Dialogue>,
    #[serde(default)]
    pub notes: String,
    /// Background image shown behind the overlays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<PathBuf>,
    #[serde(default)]
    pub aspect_ratio: PanelAspect,
    #[serde(default)]
    pub overlays: Vec<Overlay>,
}

impl Panel {
    pub fn new(idx: u32) -> Self {
        Self {
            idx,
            scene: String::new(),
            action: String::new(),
            dialogue: Vec::new(),
            notes: String::new(),
            image_path: None,
            aspect_ratio: PanelAspect::default(),
            overlays: Vec::new(),
        }
    }

    pub fn overlay(&self, id: &OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| &o.id == id)
    }

    pub fn overlay_mut(&mut self, id: &OverlayId) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|o| &o.id == id)
    }

    /// Append a hand-placed bubble on top of the others.
    pub fn add_overlay(&mut self, speaker: String) -> OverlayId {
        let overlay = Overlay::new_manual(self.idx, speaker);
        let id = overlay.id.clone();
        self.overlays.push(overlay);
        id
    }

    pub fn remove_overlay(&mut self, id: &OverlayId) -> Option<Overlay> {
        let index = self.overlays.iter().position(|o| &o.id == id)?;
        Some(self.overlays.remove(index))
    }

    /// Throw away the current overlays and lay out one per dialogue line.
    pub fn regenerate_overlays(&mut self) -> usize {
        self.overlays = self
            .dialogue
            .iter()
            .enumerate()
            .map(|(i, line)| Overlay::for_dialogue(self.idx, i, line))
            .collect();
        self.overlays.len()
    }

    /// Edit dialogue line `index`. The overlay at the same position follows.
    pub fn set_dialogue_text(&mut self, index: usize, text: String) -> bool {
        let Some(line) = self.dialogue.get_mut(index) else {
            return false;
        };
        line.text = text.clone();
        if let Some(overlay) = self.overlays.get_mut(index) {
            overlay.text = text;
        }
        true
    }

    pub fn add_dialogue_line(&mut self, by: String, text: String) {
        self.dialogue.push(Dialogue { by, text });
    }

    pub fn remove_dialogue_line(&mut self, index: usize) -> Option<Dialogue> {
        (index < self.dialogue.len()).then(|| self.dialogue.remove(index))
    }

    /// Keep every overlay's panel reference and geometry consistent.
    pub fn normalize(&mut self) {
        for overlay in &mut self.overlays {
            overlay.panel_id = self.idx;
            overlay.normalize();
        }
    }
}
