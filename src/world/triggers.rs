//! # Triggers
//!
//! Text and sound events keyed by voxel cell. Triggers are resolved against the level info
//! once at load time; the event system then looks them up whenever the player enters a cell.
//! A cell can hold one text trigger and one sound trigger independently.

use std::collections::HashMap;

use cgmath::Point2;
use log::debug;

use super::coordinates::CoordinateMapper;
use crate::assets::level::Trigger;
use crate::assets::level_info::LevelInfo;

/// A narrative text shown when the player enters a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextTrigger {
    text: String,
    displayed_once: bool,
    previously_displayed: bool,
}

impl TextTrigger {
    /// Creates a trigger that has not been shown yet.
    pub fn new(text: impl Into<String>, displayed_once: bool) -> Self {
        TextTrigger {
            text: text.into(),
            displayed_once,
            previously_displayed: false,
        }
    }

    /// The text to show.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the text is shown only once.
    pub fn is_single_display(&self) -> bool {
        self.displayed_once
    }

    /// Whether the event system has shown the text already.
    pub fn has_been_displayed(&self) -> bool {
        self.previously_displayed
    }

    /// Records whether the text has been shown. Only the event system calls this.
    pub fn set_previously_displayed(&mut self, previously_displayed: bool) {
        self.previously_displayed = previously_displayed;
    }
}

/// Trigger lookups for one loaded level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TriggerTable {
    text_triggers: HashMap<Point2<i32>, TextTrigger>,
    sound_triggers: HashMap<Point2<i32>, String>,
}

impl TriggerTable {
    /// Resolves a level's trigger records.
    ///
    /// Records whose text index is not a plain text entry, or whose sound index has no
    /// sound, are skipped for that half of the record only. When several records land on
    /// one cell, the first text and the first sound for that cell are kept.
    ///
    /// # Arguments
    /// * `triggers` - Trigger records in file order
    /// * `mapper` - Coordinate transform for the map
    /// * `info` - The level's info resource
    pub fn extract(triggers: &[Trigger], mapper: &CoordinateMapper, info: &dyn LevelInfo) -> Self {
        let mut table = TriggerTable::default();

        for trigger in triggers {
            let voxel = mapper.voxel(trigger.x, trigger.y);

            if let Some(index) = trigger.text_index {
                match info.text(index as usize) {
                    Some(text_data) => {
                        table.text_triggers.entry(voxel).or_insert_with(|| {
                            TextTrigger::new(text_data.text, text_data.displayed_once)
                        });
                    }
                    None => debug!(
                        "Skipping text trigger at {:?}: index {} is not text",
                        voxel, index
                    ),
                }
            }

            if let Some(index) = trigger.sound_index {
                match info.sound(index as usize) {
                    Some(sound) => {
                        table
                            .sound_triggers
                            .entry(voxel)
                            .or_insert_with(|| sound.to_string());
                    }
                    None => debug!("Skipping sound trigger at {:?}: no sound {}", voxel, index),
                }
            }
        }

        table
    }

    /// The text trigger at a voxel cell.
    pub fn text_trigger(&self, voxel: Point2<i32>) -> Option<&TextTrigger> {
        self.text_triggers.get(&voxel)
    }

    /// The text trigger at a voxel cell, for updating its display state.
    pub fn text_trigger_mut(&mut self, voxel: Point2<i32>) -> Option<&mut TextTrigger> {
        self.text_triggers.get_mut(&voxel)
    }

    /// The sound identifier at a voxel cell.
    pub fn sound_trigger(&self, voxel: Point2<i32>) -> Option<&str> {
        self.sound_triggers.get(&voxel).map(String::as_str)
    }

    /// Number of text triggers.
    pub fn text_count(&self) -> usize {
        self.text_triggers.len()
    }

    /// Number of sound triggers.
    pub fn sound_count(&self) -> usize {
        self.sound_triggers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::level::MapDimensions;
    use crate::assets::level_info::{InfoTable, InfoText};
    use crate::testkit::{info_with_ceiling, with_text};

    fn trigger(x: u8, y: u8, text_index: Option<u8>, sound_index: Option<u8>) -> Trigger {
        Trigger {
            x,
            y,
            text_index,
            sound_index,
        }
    }

    fn mapper() -> CoordinateMapper {
        CoordinateMapper::new(MapDimensions::new(8, 8))
    }

    #[test]
    fn text_trigger_starts_undisplayed() {
        let info = with_text(info_with_ceiling(100), 2, "Welcome", true);
        let table = TriggerTable::extract(&[trigger(5, 3, Some(2), None)], &mapper(), &info);

        let text = table.text_trigger(Point2::new(2, 4)).unwrap();
        assert_eq!(text.text(), "Welcome");
        assert!(text.is_single_display());
        assert!(!text.has_been_displayed());
        assert_eq!(table.text_count(), 1);
        assert_eq!(table.sound_count(), 0);
    }

    #[test]
    fn text_and_sound_share_a_cell() {
        let mut info = with_text(InfoTable::default(), 0, "Drip.", false);
        info.sounds.push("DRIP.VOC".to_string());
        let table = TriggerTable::extract(&[trigger(1, 1, Some(0), Some(0))], &mapper(), &info);

        let voxel = Point2::new(6, 6);
        assert_eq!(table.text_trigger(voxel).map(TextTrigger::text), Some("Drip."));
        assert_eq!(table.sound_trigger(voxel), Some("DRIP.VOC"));
    }

    #[test]
    fn keys_and_missing_entries_are_skipped() {
        let mut info = InfoTable::default();
        info.texts.insert(4, InfoText::Key { id: 1 });
        let triggers = [
            trigger(0, 0, Some(4), None),
            trigger(1, 0, Some(9), None),
            trigger(2, 0, None, Some(3)),
        ];
        let table = TriggerTable::extract(&triggers, &mapper(), &info);

        assert_eq!(table, TriggerTable::default());
    }

    #[test]
    fn first_record_wins_on_a_shared_cell() {
        let mut info = with_text(InfoTable::default(), 0, "First", false);
        info = with_text(info, 1, "Second", false);
        info.sounds = vec!["ONE.VOC".to_string(), "TWO.VOC".to_string()];
        let triggers = [
            trigger(2, 2, Some(0), Some(0)),
            trigger(2, 2, Some(1), Some(1)),
        ];
        let table = TriggerTable::extract(&triggers, &mapper(), &info);

        let voxel = Point2::new(5, 5);
        assert_eq!(table.text_trigger(voxel).map(TextTrigger::text), Some("First"));
        assert_eq!(table.sound_trigger(voxel), Some("ONE.VOC"));
        assert_eq!(table.text_count(), 1);
        assert_eq!(table.sound_count(), 1);
    }

    #[test]
    fn display_state_belongs_to_the_caller() {
        let info = with_text(InfoTable::default(), 1, "Once.", true);
        let mut table = TriggerTable::extract(&[trigger(0, 0, Some(1), None)], &mapper(), &info);
        let voxel = Point2::new(7, 7);

        table.text_trigger_mut(voxel).unwrap().set_previously_displayed(true);
        assert!(table.text_trigger(voxel).unwrap().has_been_displayed());
    }
}
