//! Ratatui form backend implementation for the FormBackend trait.
//!
//! Displays all fields at once in a scrollable form with keyboard navigation.
//! Every keystroke is forwarded to the controller, so errors update as you type.

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use job_form::{
    FieldKind, FieldPath, FieldValue, FormBackend, FormController, FormDefinition, FormError,
    SelectOption, SubmitOutcome, Variant,
};
use ratatui::{
    Frame, Terminal,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
    },
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Error type for the Ratatui form backend.
#[derive(Debug, Error)]
pub enum RatatuiFormError {
    /// User cancelled the form (Ctrl+C).
    #[error("Form cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller rejected an edit.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub background: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            background: Color::Reset,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

/// Ratatui form backend that displays all fields at once.
#[derive(Debug, Clone, Default)]
pub struct RatatuiFormBackend {
    /// Title shown at the top of the form. Falls back to the form's own title.
    title: Option<String>,
    /// Color theme for the UI.
    theme: Theme,
}

impl RatatuiFormBackend {
    /// Create a new Ratatui form backend with default settings.
    pub fn new() -> Self {
        Self {
            title: None,
            theme: Theme::default(),
        }
    }

    /// Set the title shown at the top of the form.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiFormError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiFormError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        state: &mut FormState,
        controller: &mut FormController,
    ) -> Result<Flow, RatatuiFormError> {
        loop {
            terminal.draw(|frame| draw_form(frame, state, controller))?;

            if let Event::Key(key) = event::read()? {
                match state.handle_key(key, controller)? {
                    Flow::Continue => {}
                    flow => return Ok(flow),
                }
            }
        }
    }
}

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Leave the form, keeping the last accepted submission.
    Leave,
    Cancel,
}

/// Input widget for a field.
#[derive(Debug, Clone)]
enum Widget {
    Text { multiline: bool },
    Radio { variants: Vec<Variant>, highlight: usize },
    Select { options: Vec<SelectOption>, highlight: usize },
}

/// A field in the form.
///
/// Only the text buffer and cursor live here; the value that counts and its
/// error are read back from the controller.
#[derive(Debug, Clone)]
struct FormField {
    path: FieldPath,
    prompt: String,
    widget: Widget,
    text: String,
    /// Cursor position in characters.
    cursor_pos: usize,
}

/// State for the entire form.
struct FormState {
    fields: Vec<FormField>,
    focused_idx: usize,
    /// Scroll offset in rows
    scroll_offset: u16,
    /// Whether the submit button is focused
    submit_focused: bool,
    theme: Theme,
    title: String,
    prelude: Option<String>,
    submit_label: String,
}

impl FormState {
    fn new(controller: &FormController, theme: Theme, title: Option<String>) -> Self {
        let definition: &FormDefinition = controller.definition();
        let fields = definition
            .fields()
            .iter()
            .map(|schema| {
                let current = controller.value(schema.path());
                let widget = match schema.kind() {
                    FieldKind::Input => Widget::Text { multiline: false },
                    FieldKind::Multiline => Widget::Text { multiline: true },
                    FieldKind::OneOf(one_of) => Widget::Radio {
                        variants: one_of.variants().to_vec(),
                        highlight: current.and_then(FieldValue::as_chosen_variant).unwrap_or(0),
                    },
                    FieldKind::Select(select) => Widget::Select {
                        options: select.options().to_vec(),
                        highlight: current
                            .and_then(FieldValue::as_int)
                            .and_then(|n| select.position(n))
                            .unwrap_or(0),
                    },
                };
                let text = current
                    .and_then(FieldValue::as_str)
                    .unwrap_or_default()
                    .to_string();

                FormField {
                    path: schema.path().clone(),
                    prompt: schema.ask().to_string(),
                    widget,
                    cursor_pos: text.chars().count(),
                    text,
                }
            })
            .collect();

        Self {
            fields,
            focused_idx: 0,
            scroll_offset: 0,
            submit_focused: definition.fields().is_empty(),
            theme,
            title: title
                .or_else(|| definition.title.clone())
                .unwrap_or_else(|| "Form".to_string()),
            prelude: definition.prelude.clone(),
            submit_label: definition
                .epilogue
                .clone()
                .unwrap_or_else(|| "Submit".to_string()),
        }
    }

    fn handle_key(
        &mut self,
        key: KeyEvent,
        controller: &mut FormController,
    ) -> Result<Flow, FormError> {
        if key.kind != KeyEventKind::Press {
            return Ok(Flow::Continue);
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => {
                debug!("form cancelled");
                return Ok(Flow::Cancel);
            }
            KeyCode::Esc => {
                debug!(accepted = controller.snapshot().is_some(), "leaving form");
                return Ok(Flow::Leave);
            }
            // Ctrl+Enter or F10 submits from anywhere
            KeyCode::Enter if ctrl => self.submit(controller),
            KeyCode::F(10) => self.submit(controller),
            // Enter: submit if on button, select option, new line, or move to next field
            KeyCode::Enter => {
                if self.submit_focused {
                    self.submit(controller);
                } else if self.is_selection_field() {
                    self.select_option(controller)?;
                } else if self.is_multiline_field() {
                    self.insert_char('\n', controller)?;
                } else {
                    self.next_field();
                }
            }
            KeyCode::BackTab => self.prev_field(),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => self.prev_field(),
            KeyCode::Tab => self.next_field(),
            KeyCode::Up => {
                if self.is_selection_field() {
                    self.option_up();
                } else {
                    self.prev_field();
                }
            }
            KeyCode::Down => {
                if self.is_selection_field() {
                    self.option_down();
                } else {
                    self.next_field();
                }
            }
            KeyCode::Left if ctrl => self.prev_field(),
            KeyCode::Right if ctrl => self.next_field(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Char(' ') if self.is_selection_field() => self.select_option(controller)?,
            KeyCode::Char(c) => self.insert_char(c, controller)?,
            KeyCode::Backspace => self.backspace(controller)?,
            KeyCode::Delete => self.delete(controller)?,
            KeyCode::Home => {
                if let Some(field) = self.focused_text_field_mut() {
                    field.cursor_pos = 0;
                }
            }
            KeyCode::End => {
                if let Some(field) = self.focused_text_field_mut() {
                    field.cursor_pos = field.text.chars().count();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..5 {
                    self.next_field();
                }
            }
            KeyCode::PageUp => {
                for _ in 0..5 {
                    self.prev_field();
                }
            }
            _ => {}
        }
        Ok(Flow::Continue)
    }

    fn focused_field(&self) -> Option<&FormField> {
        if self.submit_focused {
            return None;
        }
        self.fields.get(self.focused_idx)
    }

    fn focused_text_field_mut(&mut self) -> Option<&mut FormField> {
        if self.submit_focused {
            return None;
        }
        self.fields
            .get_mut(self.focused_idx)
            .filter(|f| matches!(f.widget, Widget::Text { .. }))
    }

    fn is_selection_field(&self) -> bool {
        self.focused_field()
            .is_some_and(|f| matches!(f.widget, Widget::Radio { .. } | Widget::Select { .. }))
    }

    fn is_multiline_field(&self) -> bool {
        self.focused_field()
            .is_some_and(|f| matches!(f.widget, Widget::Text { multiline: true }))
    }

    /// Y position of a field in the virtual scroll area
    fn field_y_position(&self, target_idx: usize) -> u16 {
        self.fields
            .iter()
            .take(target_idx)
            .map(|f| field_height(f) + FIELD_SPACING)
            .sum()
    }

    fn total_content_height(&self) -> u16 {
        let heights: u16 = self.fields.iter().map(field_height).sum();
        let gaps = self.fields.len().saturating_sub(1) as u16 * FIELD_SPACING;
        heights + gaps
    }

    /// Adjust scroll offset to keep the focused field on screen
    fn adjust_scroll(&mut self, viewport_height: u16) {
        let Some(focused) = self.focused_field() else {
            return;
        };
        let field_y = self.field_y_position(self.focused_idx);
        let field_bottom = field_y + field_height(focused);

        if field_y < self.scroll_offset {
            self.scroll_offset = field_y;
        }
        if field_bottom > self.scroll_offset + viewport_height {
            self.scroll_offset = field_bottom.saturating_sub(viewport_height);
        }
    }

    fn next_field(&mut self) {
        if self.submit_focused {
            return;
        }
        if self.focused_idx + 1 < self.fields.len() {
            self.focused_idx += 1;
        } else {
            self.submit_focused = true;
        }
    }

    fn prev_field(&mut self) {
        if self.submit_focused {
            if !self.fields.is_empty() {
                self.submit_focused = false;
                self.focused_idx = self.fields.len() - 1;
            }
            return;
        }
        self.focused_idx = self.focused_idx.saturating_sub(1);
    }

    fn submit(&mut self, controller: &mut FormController) {
        match controller.submit() {
            SubmitOutcome::Accepted => debug!("showing summary"),
            SubmitOutcome::Rejected { failed } => {
                // Jump to the first field that needs attention
                if let Some(idx) = failed
                    .first()
                    .and_then(|path| self.fields.iter().position(|f| &f.path == path))
                {
                    self.focused_idx = idx;
                    self.submit_focused = false;
                }
            }
        }
    }

    fn insert_char(&mut self, c: char, controller: &mut FormController) -> Result<(), FormError> {
        if let Some(field) = self.focused_text_field_mut() {
            let at = byte_offset(&field.text, field.cursor_pos);
            field.text.insert(at, c);
            field.cursor_pos += 1;
            controller.set_field_value(&field.path, field.text.clone())?;
        }
        Ok(())
    }

    fn backspace(&mut self, controller: &mut FormController) -> Result<(), FormError> {
        if let Some(field) = self.focused_text_field_mut()
            && field.cursor_pos > 0
        {
            field.cursor_pos -= 1;
            let at = byte_offset(&field.text, field.cursor_pos);
            field.text.remove(at);
            controller.set_field_value(&field.path, field.text.clone())?;
        }
        Ok(())
    }

    fn delete(&mut self, controller: &mut FormController) -> Result<(), FormError> {
        if let Some(field) = self.focused_text_field_mut()
            && field.cursor_pos < field.text.chars().count()
        {
            let at = byte_offset(&field.text, field.cursor_pos);
            field.text.remove(at);
            controller.set_field_value(&field.path, field.text.clone())?;
        }
        Ok(())
    }

    fn cursor_left(&mut self) {
        if let Some(field) = self.focused_text_field_mut()
            && field.cursor_pos > 0
        {
            field.cursor_pos -= 1;
        }
    }

    fn cursor_right(&mut self) {
        if let Some(field) = self.focused_text_field_mut()
            && field.cursor_pos < field.text.chars().count()
        {
            field.cursor_pos += 1;
        }
    }

    /// Move highlight up within the options
    fn option_up(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused_idx) {
            let (len, highlight) = match &mut field.widget {
                Widget::Radio {
                    variants,
                    highlight,
                } => (variants.len(), highlight),
                Widget::Select { options, highlight } => (options.len(), highlight),
                Widget::Text { .. } => return,
            };
            if len > 0 {
                *highlight = (*highlight + len - 1) % len;
            }
        }
    }

    /// Move highlight down within the options
    fn option_down(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focused_idx) {
            let (len, highlight) = match &mut field.widget {
                Widget::Radio {
                    variants,
                    highlight,
                } => (variants.len(), highlight),
                Widget::Select { options, highlight } => (options.len(), highlight),
                Widget::Text { .. } => return,
            };
            if len > 0 {
                *highlight = (*highlight + 1) % len;
            }
        }
    }

    /// Pick the highlighted option
    fn select_option(&mut self, controller: &mut FormController) -> Result<(), FormError> {
        let Some(field) = self.focused_field() else {
            return Ok(());
        };
        let value = match &field.widget {
            Widget::Radio {
                variants,
                highlight,
            } => variants
                .get(*highlight)
                .map(|v| FieldValue::String(v.code.clone())),
            Widget::Select { options, highlight } => {
                options.get(*highlight).map(|o| FieldValue::Int(o.value))
            }
            Widget::Text { .. } => None,
        };
        if let Some(value) = value {
            controller.set_field_value(&field.path, value)?;
        }
        Ok(())
    }
}

/// Byte index of the `char_pos`-th character.
fn byte_offset(text: &str, char_pos: usize) -> usize {
    text.char_indices()
        .nth(char_pos)
        .map_or(text.len(), |(idx, _)| idx)
}

/// Line and display column of the cursor. Wide characters take two cells.
fn cursor_cell(text: &str, cursor_pos: usize) -> (u16, u16) {
    let before = &text[..byte_offset(text, cursor_pos)];
    let line = before.matches('\n').count() as u16;
    let column = before.rsplit('\n').next().map_or(0, UnicodeWidthStr::width) as u16;
    (line, column)
}

/// Blank rows between fields
const FIELD_SPACING: u16 = 1;

fn field_height(field: &FormField) -> u16 {
    match &field.widget {
        Widget::Text { multiline: true } => 4,
        Widget::Text { multiline: false } => 3,
        Widget::Radio { variants, .. } => 2 + variants.len() as u16,
        Widget::Select { options, .. } => 2 + options.len() as u16,
    }
}

fn draw_form(frame: &mut Frame, state: &mut FormState, controller: &FormController) {
    let area = frame.area();
    let theme = state.theme.clone();
    let summary = controller.summary();
    let summary_height = summary
        .as_ref()
        .map_or(0, |s| s.lines().len() as u16 + 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Title
            Constraint::Min(10),                // Form content
            Constraint::Length(summary_height), // Summary of the accepted submission
            Constraint::Length(3),              // Submit button
            Constraint::Length(1),              // Help bar
        ])
        .split(area);

    // Title
    let title_text = match &state.prelude {
        Some(prelude) => format!("{}\n{}", state.title, prelude),
        None => state.title.clone(),
    };
    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    // Form content, leaving a column for the scrollbar
    let form_area = chunks[1];
    let content_width = form_area.width.saturating_sub(2);
    let viewport_height = form_area.height;

    state.adjust_scroll(viewport_height);
    let total_height = state.total_content_height();
    let scroll_offset = state.scroll_offset;

    let mut virtual_y: u16 = 0;
    for (idx, field) in state.fields.iter().enumerate() {
        let height = field_height(field);
        let field_top = virtual_y;
        virtual_y += height + FIELD_SPACING;

        // Fields clipped at the top are skipped
        if field_top < scroll_offset {
            continue;
        }
        if field_top >= scroll_offset + viewport_height {
            break;
        }

        let visible_top = field_top - scroll_offset;
        let visible_height = height.min(viewport_height - visible_top);
        let field_area = Rect {
            x: form_area.x + 1,
            y: form_area.y + visible_top,
            width: content_width,
            height: visible_height,
        };
        let is_focused = !state.submit_focused && idx == state.focused_idx;
        draw_field(frame, field, controller, field_area, is_focused, &theme);
    }

    if total_height > viewport_height {
        let scrollbar_area = Rect {
            x: form_area.x + form_area.width - 1,
            y: form_area.y,
            width: 1,
            height: viewport_height,
        };

        let mut scrollbar_state = ScrollbarState::new(total_height as usize)
            .position(scroll_offset as usize)
            .viewport_content_length(viewport_height as usize);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    if let Some(summary) = summary {
        let lines: Vec<ListItem> = summary
            .lines()
            .iter()
            .map(|line| ListItem::new(format!("{}: {}", line.prompt, line.value)))
            .collect();
        let panel = List::new(lines)
            .style(Style::default().fg(theme.text))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.success))
                    .title(" Submitted ")
                    .title_style(Style::default().fg(theme.success)),
            );
        frame.render_widget(panel, chunks[2]);
    }

    // Submit button
    let submit_style = if state.submit_focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let submit_text = if state.submit_focused {
        format!("[ {} ]", state.submit_label)
    } else {
        state.submit_label.clone()
    };
    let submit_button = Paragraph::new(submit_text)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if state.submit_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(submit_button, chunks[3]);

    let help_text = "Tab: Next  ↑/↓: Navigate  Space/Enter: Select  F10: Submit  Esc: Done  Ctrl+C: Cancel";
    let help = Paragraph::new(help_text).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);
}

fn draw_field(
    frame: &mut Frame,
    field: &FormField,
    controller: &FormController,
    area: Rect,
    is_focused: bool,
    theme: &Theme,
) {
    let error = controller.error(&field.path);
    let border_color = if error.is_some() {
        theme.error
    } else if is_focused {
        theme.primary
    } else {
        theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", field.prompt))
        .title_style(Style::default().fg(if is_focused {
            theme.highlight
        } else {
            theme.text
        }));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    match &field.widget {
        Widget::Text { .. } => {
            let (line, column) = cursor_cell(&field.text, field.cursor_pos);
            let scroll = (line + 1).saturating_sub(inner.height);

            let text = Paragraph::new(field.text.as_str())
                .style(Style::default().fg(theme.text))
                .scroll((scroll, 0));
            frame.render_widget(text, inner);

            if is_focused {
                let cursor_x = inner.x + column;
                let cursor_y = inner.y + line - scroll;
                if cursor_x < inner.x + inner.width && cursor_y < inner.y + inner.height {
                    frame.set_cursor_position((cursor_x, cursor_y));
                }
            }
        }
        Widget::Radio {
            variants,
            highlight,
        } => {
            let selected = controller
                .value(&field.path)
                .and_then(FieldValue::as_chosen_variant);
            let labels = variants.iter().map(|v| v.label.as_str());
            frame.render_widget(
                option_list(labels, selected, *highlight, is_focused, theme),
                inner,
            );
        }
        Widget::Select { options, highlight } => {
            let selected = controller
                .value(&field.path)
                .and_then(FieldValue::as_int)
                .and_then(|n| options.iter().position(|o| o.value == n));
            let labels = options.iter().map(|o| o.label.as_str());
            frame.render_widget(
                option_list(labels, selected, *highlight, is_focused, theme),
                inner,
            );
        }
    }

    // Errors sit on the bottom border
    if let Some(error) = error {
        let error_text =
            Paragraph::new(format!("⚠ {}", error)).style(Style::default().fg(theme.error));
        let error_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(error_text, error_area);
    }
}

fn option_list<'a>(
    labels: impl Iterator<Item = &'a str>,
    selected: Option<usize>,
    highlight: usize,
    is_focused: bool,
    theme: &Theme,
) -> List<'a> {
    let items: Vec<ListItem> = labels
        .enumerate()
        .map(|(idx, label)| {
            let marker = if selected == Some(idx) { "(●)" } else { "( )" };
            let style = if is_focused && idx == highlight {
                Style::default()
                    .fg(theme.text)
                    .bg(theme.selected_bg)
                    .add_modifier(Modifier::BOLD)
            } else if selected == Some(idx) {
                Style::default().fg(theme.highlight)
            } else {
                Style::default().fg(theme.text)
            };
            ListItem::new(format!("{} {}", marker, label)).style(style)
        })
        .collect();
    List::new(items)
}

impl FormBackend for RatatuiFormBackend {
    type Error = RatatuiFormError;

    fn drive(&self, controller: &mut FormController) -> Result<(), Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let mut state = FormState::new(controller, self.theme.clone(), self.title.clone());

        // Restore the terminal before reporting anything that went wrong
        let flow = self.event_loop(&mut terminal, &mut state, controller);
        self.restore_terminal(&mut terminal)?;

        match flow? {
            Flow::Cancel => Err(RatatuiFormError::Cancelled),
            Flow::Leave | Flow::Continue => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use job_application::JobApplication;
    use job_form::REQUIRED_MESSAGE;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(state: &mut FormState, controller: &mut FormController, code: KeyCode) -> Flow {
        state.handle_key(key(code), controller).unwrap()
    }

    fn type_str(state: &mut FormState, controller: &mut FormController, text: &str) {
        for c in text.chars() {
            press(state, controller, KeyCode::Char(c));
        }
    }

    fn new_form() -> (FormState, FormController) {
        let controller = JobApplication::builder().controller();
        let state = FormState::new(&controller, Theme::default(), None);
        (state, controller)
    }

    fn fill_valid(state: &mut FormState, controller: &mut FormController) {
        // department: first option
        press(state, controller, KeyCode::Char(' '));
        press(state, controller, KeyCode::Tab);
        // motivation: second option
        press(state, controller, KeyCode::Down);
        press(state, controller, KeyCode::Char(' '));
        press(state, controller, KeyCode::Tab);
        // salary: second option
        press(state, controller, KeyCode::Down);
        press(state, controller, KeyCode::Enter);
        press(state, controller, KeyCode::Tab);
        type_str(state, controller, "hi");
        press(state, controller, KeyCode::Tab);
        type_str(state, controller, "eleven char");
        press(state, controller, KeyCode::Tab);
        type_str(state, controller, "a@naver.com");
        press(state, controller, KeyCode::Tab);
    }

    fn render(state: &mut FormState, controller: &FormController) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 60)).unwrap();
        terminal
            .draw(|frame| draw_form(frame, state, controller))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn backend_creation() {
        let _backend = RatatuiFormBackend::new();
        let _with_title = RatatuiFormBackend::new().with_title("Test");
        let _with_theme = RatatuiFormBackend::new().with_theme(Theme::default());
    }

    #[test]
    fn error_types() {
        let err = RatatuiFormError::Cancelled;
        assert_eq!(err.to_string(), "Form cancelled by user");

        let err = RatatuiFormError::from(io::Error::other("tty gone"));
        assert_eq!(err.to_string(), "I/O error: tty gone");

        let err = RatatuiFormError::from(FormError::UnknownField("nickname".into()));
        assert_eq!(err.to_string(), "Unknown field: nickname");
    }

    #[test]
    fn theme_default() {
        let theme = Theme::default();
        assert_eq!(theme.primary, Color::Cyan);
        assert_eq!(theme.error, Color::Red);
    }

    #[test]
    fn title_and_submit_label_come_from_form() {
        let (state, _) = new_form();
        assert_eq!(state.title, "Job Application Form");
        assert_eq!(state.submit_label, "Give me this job");

        let controller = JobApplication::builder().controller();
        let state = FormState::new(&controller, Theme::default(), Some("Apply".to_string()));
        assert_eq!(state.title, "Apply");
    }

    #[test]
    fn typing_updates_controller() {
        let (mut state, mut controller) = new_form();
        state.focused_idx = 5;

        type_str(&mut state, &mut controller, "a@gmail.com");
        assert_eq!(
            controller.value("email"),
            Some(&FieldValue::String("a@gmail.com".to_string()))
        );
        assert_eq!(controller.error("email"), Some("Only naver email is available"));

        for _ in 0.."a@gmail.com".len() {
            press(&mut state, &mut controller, KeyCode::Backspace);
        }
        assert_eq!(controller.error("email"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn cursor_edits_multibyte_text() {
        let (mut state, mut controller) = new_form();
        state.focused_idx = 3;

        type_str(&mut state, &mut controller, "안녕");
        press(&mut state, &mut controller, KeyCode::Left);
        type_str(&mut state, &mut controller, "x");
        press(&mut state, &mut controller, KeyCode::Delete);
        assert_eq!(
            controller.value("introduce"),
            Some(&FieldValue::String("안x".to_string()))
        );
    }

    #[test]
    fn cursor_column_counts_display_cells() {
        assert_eq!(cursor_cell("안녕", 2), (0, 4));
        assert_eq!(cursor_cell("안녕", 1), (0, 2));
        assert_eq!(cursor_cell("ab\ncd", 4), (1, 1));
        assert_eq!(cursor_cell("", 0), (0, 0));
    }

    #[test]
    fn enter_adds_line_in_textarea() {
        let (mut state, mut controller) = new_form();
        state.focused_idx = 4;

        type_str(&mut state, &mut controller, "to fly");
        press(&mut state, &mut controller, KeyCode::Enter);
        type_str(&mut state, &mut controller, "high");
        assert_eq!(
            controller.value("dreams"),
            Some(&FieldValue::String("to fly\nhigh".to_string()))
        );
        assert_eq!(state.focused_idx, 4);
    }

    #[test]
    fn radio_selection() {
        let (mut state, mut controller) = new_form();

        press(&mut state, &mut controller, KeyCode::Up);
        press(&mut state, &mut controller, KeyCode::Enter);
        assert_eq!(
            controller.value("department"),
            Some(&FieldValue::ChosenVariant(3))
        );
        assert_eq!(controller.error("department"), None);
    }

    #[test]
    fn rejected_submit_focuses_first_failure() {
        let (mut state, mut controller) = new_form();
        state.focused_idx = 3;
        type_str(&mut state, &mut controller, "hi");

        press(&mut state, &mut controller, KeyCode::F(10));
        assert_eq!(controller.submit_count(), 1);
        assert!(controller.snapshot().is_none());
        assert_eq!(state.focused_idx, 0);
        assert_eq!(controller.error("department"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn valid_submit_shows_summary() {
        let (mut state, mut controller) = new_form();
        fill_valid(&mut state, &mut controller);
        assert!(state.submit_focused);

        assert_eq!(
            press(&mut state, &mut controller, KeyCode::Enter),
            Flow::Continue
        );
        assert!(controller.snapshot().is_some());

        let screen = render(&mut state, &controller);
        assert!(screen.contains("What department do you want to work for?: Sales"));
        assert!(screen.contains("Why do you want to join this company?: I love this company"));
        assert!(screen.contains("Salary: $100K"));
        assert!(screen.contains("Give me this job"));
    }

    #[test]
    fn errors_are_drawn_inline() {
        let (mut state, mut controller) = new_form();
        state.focused_idx = 4;
        type_str(&mut state, &mut controller, "short");

        let screen = render(&mut state, &controller);
        assert!(screen.contains("Please write more than 10 letters."));
    }

    #[test]
    fn escape_and_ctrl_c() {
        let (mut state, mut controller) = new_form();
        assert_eq!(press(&mut state, &mut controller, KeyCode::Esc), Flow::Leave);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            state.handle_key(ctrl_c, &mut controller).unwrap(),
            Flow::Cancel
        );
        assert_eq!(controller.value("introduce"), None);
    }
}
