/*
 * Custom buttons and radio buttons, and the ordered collections that own them.
 * An element's id is its zero-based position in the owning collection; the
 * native dialog reports clicks by that id and the dialog resolves it back to
 * the element. Elements are configured with builder methods before they are
 * added and edited through `TaskDialog::update_button` /
 * `TaskDialog::update_radio_button` afterwards, so every live change passes
 * through the dialog that can forward it.
 */
use crate::dialog::{DialogHandler, TaskDialog};
use crate::native::ButtonEntry;
use crate::text::DialogText;
use crate::types::ButtonStyle;

use std::fmt;

pub struct Button {
    title: String,
    description: Option<DialogText>,
    pub(crate) enabled: bool,
    pub(crate) elevation_required: bool,
    pub(crate) prevent_close: bool,
    pub(crate) on_click: Option<DialogHandler>,
}

impl Button {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            enabled: true,
            elevation_required: false,
            prevent_close: false,
            on_click: None,
        }
    }

    /// Second line shown under the title when the dialog uses command links.
    pub fn description(mut self, description: impl Into<DialogText>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Shows the UAC shield on the button.
    pub fn elevation_required(mut self, required: bool) -> Self {
        self.elevation_required = required;
        self
    }

    /// Clicking the button raises its handler but leaves the dialog open.
    pub fn prevent_close(mut self, prevent: bool) -> Self {
        self.prevent_close = prevent;
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&mut TaskDialog) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_elevation_required(&self) -> bool {
        self.elevation_required
    }

    pub fn is_prevent_close(&self) -> bool {
        self.prevent_close
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_elevation_required(&mut self, required: bool) {
        self.elevation_required = required;
    }

    pub fn set_prevent_close(&mut self, prevent: bool) {
        self.prevent_close = prevent;
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("title", &self.title)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .field("elevation_required", &self.elevation_required)
            .field("prevent_close", &self.prevent_close)
            .finish_non_exhaustive()
    }
}

pub struct RadioButton {
    title: String,
    pub(crate) enabled: bool,
    pub(crate) checked: bool,
    pub(crate) on_click: Option<DialogHandler>,
}

impl RadioButton {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            enabled: true,
            checked: false,
            on_click: None,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn on_click(mut self, handler: impl FnMut(&mut TaskDialog) + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Selection state as last reported by the dialog.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Debug for RadioButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioButton")
            .field("title", &self.title)
            .field("enabled", &self.enabled)
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}

/// Anything that can be listed in the native button arrays.
pub(crate) trait DialogElement {
    fn display_text(&self, style: ButtonStyle) -> String;
}

impl DialogElement for Button {
    /*
     * Command links draw the first line as the title and the rest as the
     * description. Descriptions never carry hyperlink markup.
     */
    fn display_text(&self, style: ButtonStyle) -> String {
        match (&self.description, style.is_command_link()) {
            (Some(description), true) => {
                format!("{}\n{}", self.title, description.render(false))
            }
            _ => self.title.clone(),
        }
    }
}

impl DialogElement for RadioButton {
    fn display_text(&self, _style: ButtonStyle) -> String {
        self.title.clone()
    }
}

#[derive(Debug)]
pub struct ElementCollection<T> {
    items: Vec<T>,
}

impl<T> Default for ElementCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> ElementCollection<T> {
    /// Appends an element and returns the id the native dialog will report for it.
    pub(crate) fn push(&mut self, item: T) -> i32 {
        self.items.push(item);
        (self.items.len() - 1) as i32
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        usize::try_from(id).ok().and_then(|index| self.items.get(index))
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        usize::try_from(id)
            .ok()
            .and_then(|index| self.items.get_mut(index))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut()
    }

    /// Ids of the elements matching `predicate`, in collection order.
    pub(crate) fn ids_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<i32> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| predicate(item))
            .map(|(index, _)| index as i32)
            .collect()
    }
}

impl<T: DialogElement> ElementCollection<T> {
    pub(crate) fn entries(&self, style: ButtonStyle) -> Vec<ButtonEntry> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| ButtonEntry {
                id: index as i32,
                text: item.display_text(style),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{Hyperlink, RichText};

    #[test]
    fn test_ids_follow_insertion_order() {
        // Arrange
        let mut buttons = ElementCollection::default();
        // Act
        let first = buttons.push(Button::new("Save"));
        let second = buttons.push(Button::new("Discard"));
        // Assert
        assert_eq!((first, second), (0, 1));
        assert_eq!(buttons.get(1).map(Button::title), Some("Discard"));
        assert!(buttons.get(-1).is_none());
        assert!(buttons.get(2).is_none());
    }

    #[test]
    fn test_entries_use_title_for_normal_style() {
        let mut buttons = ElementCollection::default();
        buttons.push(Button::new("Save").description("Writes the file"));

        let entries = buttons.entries(ButtonStyle::Normal);

        assert_eq!(
            entries,
            vec![ButtonEntry {
                id: 0,
                text: "Save".to_string()
            }]
        );
    }

    #[test]
    fn test_command_links_render_title_and_description() {
        let mut buttons = ElementCollection::default();
        buttons.push(Button::new("Save").description(
            RichText::new()
                .text("See ")
                .link(Hyperlink::new("docs", "app://docs")),
        ));
        buttons.push(Button::new("Discard"));

        let entries = buttons.entries(ButtonStyle::CommandLinksNoIcon);

        assert_eq!(entries[0].text, "Save\nSee docs");
        assert_eq!(entries[1].text, "Discard");
    }

    #[test]
    fn test_ids_where_filters_disabled_elements() {
        let mut radios = ElementCollection::default();
        radios.push(RadioButton::new("a"));
        radios.push(RadioButton::new("b").enabled(false));
        radios.push(RadioButton::new("c").enabled(false));

        assert_eq!(radios.ids_where(|radio| !radio.is_enabled()), vec![1, 2]);
    }

    #[test]
    fn test_button_defaults_are_enabled_and_closing() {
        let button = Button::new("OK");
        assert!(button.is_enabled());
        assert!(!button.is_elevation_required());
        assert!(!button.is_prevent_close());
    }
}
