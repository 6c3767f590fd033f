//! Drawing the hotkey selection dialog with ratatui.
//!
//! [`DialogLayout`] is computed once per frame and reused for mouse hit
//! testing, so a click always lands on what was drawn.

use super::{DialogButton, HotkeySelection, InputEvent, TITLE};
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use ratatui::Frame;

/// Dialog width in columns
const DIALOG_WIDTH: u16 = 60;
/// Dialog height as a percentage of the screen
const DIALOG_HEIGHT_PERCENT: u32 = 80;
/// Smallest height that still shows title, one row and the buttons
const MIN_DIALOG_HEIGHT: u16 = 9;
const BUTTON_GAP: u16 = 2;

/// Screen regions of a drawn dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    pub popup: Rect,
    pub title: Rect,
    /// Bordered list area
    pub list: Rect,
    /// Rows of the list, inside its border
    pub list_rows: Rect,
    pub no_button: Rect,
    pub yes_button: Rect,
}

impl DialogLayout {
    /// Lay the dialog out centered in `area`.
    pub fn new(area: Rect) -> Self {
        let popup = popup_area(area);
        let inner = outer_block().inner(popup);

        let [title, _, list, _, buttons] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let list_rows = Block::default().borders(Borders::ALL).inner(list);

        let [no_button, yes_button] = Layout::horizontal([
            Constraint::Length(button_width(DialogButton::No)),
            Constraint::Length(button_width(DialogButton::Yes)),
        ])
        .flex(Flex::Center)
        .spacing(BUTTON_GAP)
        .areas(buttons);

        Self {
            popup,
            title,
            list,
            list_rows,
            no_button,
            yes_button,
        }
    }

    /// Number of rows visible in the list.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.list_rows.height)
    }

    /// Translate a left click at (`column`, `row`) into a dialog event.
    pub fn hit_test(&self, dialog: &HotkeySelection, column: u16, row: u16) -> Option<InputEvent> {
        if !dialog.has_content() {
            return None;
        }
        if contains(self.no_button, column, row) {
            return Some(InputEvent::Click(DialogButton::No));
        }
        if contains(self.yes_button, column, row) {
            return Some(InputEvent::Click(DialogButton::Yes));
        }
        if contains(self.list_rows, column, row) {
            let offset = scroll_offset(dialog.cursor(), self.visible_rows());
            let index = offset + usize::from(row - self.list_rows.y);
            if index < dialog.rows().len() {
                return Some(InputEvent::ToggleRow(index));
            }
        }
        None
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn popup_area(area: Rect) -> Rect {
    let width = DIALOG_WIDTH.min(area.width);
    let scaled = u32::from(area.height) * DIALOG_HEIGHT_PERCENT / 100;
    let height = u16::try_from(scaled)
        .unwrap_or(area.height)
        .max(MIN_DIALOG_HEIGHT)
        .min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn button_width(button: DialogButton) -> u16 {
    // One column of padding each side
    button.label().len() as u16 + 2
}

fn outer_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Blue))
        .padding(Padding::new(2, 2, 1, 1))
}

/// First visible row so the cursor stays on screen.
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 || cursor < visible {
        0
    } else {
        cursor + 1 - visible
    }
}

/// Draw the dialog over `area`. Returns the layout used, or `None` when the
/// dialog has no content (no wallet path configured) and nothing was drawn.
pub fn draw(frame: &mut Frame, area: Rect, dialog: &HotkeySelection) -> Option<DialogLayout> {
    if !dialog.has_content() {
        return None;
    }

    let layout = DialogLayout::new(area);
    frame.render_widget(Clear, layout.popup);
    frame.render_widget(outer_block(), layout.popup);

    let title = Paragraph::new(TITLE)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, layout.title);

    let items: Vec<ListItem> = dialog
        .rows()
        .iter()
        .map(|row| {
            let (mark, style) = if row.selected {
                ("[x] ", Style::default().fg(Color::Green))
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(format!("{}{}", mark, row.label))).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default()
        .with_offset(scroll_offset(dialog.cursor(), layout.visible_rows()))
        .with_selected((!dialog.rows().is_empty()).then_some(dialog.cursor()));
    frame.render_stateful_widget(list, layout.list, &mut state);

    draw_button(frame, layout.no_button, DialogButton::No, Color::Red);
    draw_button(frame, layout.yes_button, DialogButton::Yes, Color::Green);

    Some(layout)
}

fn draw_button(frame: &mut Frame, area: Rect, button: DialogButton, color: Color) {
    let paragraph = Paragraph::new(button.label())
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(paragraph, area);
}
