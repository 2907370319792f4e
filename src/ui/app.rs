use std::mem;
use std::path::Path;

use crossterm::event::KeyCode;
use open::that as open_file;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use tracing::{info, warn};

use crate::export::render_summaries;
use crate::guestlist::{GuestList, Removal, SearchOutcome};
use crate::models::Attendee;

use super::forms::{
    AttendeeField, AttendeeForm, ConfirmAddition, ConfirmDeletion, FormatChoice, PathForm,
    SearchForm,
};
use super::helpers::{centered_rect, menu_tile_lines, surface_error};
use super::screens::{AttendeePicker, Notice, NoticeKind};

/// Menu tiles per row; the four actions form a 2×2 grid.
const MENU_COLUMNS: usize = 2;
/// Height of one menu tile including its border.
const MENU_TILE_HEIGHT: u16 = 5;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// The four actions offered on the main menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Add,
    Delete,
    Search,
    Export,
}

impl MenuAction {
    pub(crate) const ALL: [MenuAction; 4] = [
        MenuAction::Add,
        MenuAction::Delete,
        MenuAction::Search,
        MenuAction::Export,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            MenuAction::Add => "Add an attendee",
            MenuAction::Delete => "Delete an attendee",
            MenuAction::Search => "Get info on an attendee",
            MenuAction::Export => "Get full list",
        }
    }

    pub(crate) fn tooltip(self) -> &'static str {
        match self {
            MenuAction::Add => "Adds an attendee based on your input",
            MenuAction::Delete => "Deletes an attendee chosen from the list",
            MenuAction::Search => "Provides more information about an attendee based on your input",
            MenuAction::Export => "Exports a list of attendees in xlsx or docx format",
        }
    }

    fn from_shortcut(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'a' | '+' => Some(MenuAction::Add),
            'd' | '-' => Some(MenuAction::Delete),
            's' | 'f' => Some(MenuAction::Search),
            'e' => Some(MenuAction::Export),
            _ => None,
        }
    }
}

/// Modal state layered over the menu.
enum Mode {
    Normal,
    Adding(AttendeeForm),
    ConfirmAddition(ConfirmAddition),
    Picking(AttendeePicker),
    ConfirmDeletion(ConfirmDeletion),
    Searching(SearchForm),
    ChoosingFormat(FormatChoice),
    EnteringPath(PathForm),
    /// A message to acknowledge, optionally followed by another mode instead
    /// of returning to the menu.
    Notice(Notice, Option<Box<Mode>>),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: NoticeKind,
}

fn kind_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Info => Style::default().fg(Color::Green),
        NoticeKind::Error => Style::default().fg(Color::Red),
    }
}

/// Central application state shared across the TUI.
pub struct App {
    guests: GuestList,
    attendees: Vec<Attendee>,
    selected: usize,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(guests: GuestList, attendees: Vec<Attendee>) -> Self {
        Self {
            guests,
            attendees,
            selected: 0,
            mode: Mode::Normal,
            status: None,
        }
    }

    /// Route one key press to the active mode. Returns `true` when the user
    /// asked to quit. Database failures never end the session; they are shown
    /// in the footer or in the active popup.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit),
            Mode::Adding(form) => self.handle_adding(code, form),
            Mode::ConfirmAddition(confirm) => self.handle_confirm_addition(code, confirm),
            Mode::Picking(picker) => self.handle_picking(code, picker),
            Mode::ConfirmDeletion(confirm) => self.handle_confirm_deletion(code, confirm),
            Mode::Searching(form) => self.handle_searching(code, form),
            Mode::ChoosingFormat(choice) => self.handle_choosing_format(code, choice),
            Mode::EnteringPath(form) => self.handle_entering_path(code, form),
            Mode::Notice(notice, after) => self.handle_notice(code, notice, after),
        };

        exit
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Left => self.move_horizontal(-1),
            KeyCode::Right => self.move_horizontal(1),
            KeyCode::Up => self.move_vertical(-1),
            KeyCode::Down => self.move_vertical(1),
            KeyCode::Enter => {
                self.clear_status();
                return self.start_action(MenuAction::ALL[self.selected]);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.reload_attendees() {
                    self.set_status(
                        format!("Guest list reloaded ({} attendees).", self.attendees.len()),
                        NoticeKind::Info,
                    );
                }
            }
            KeyCode::Char(ch) => {
                if let Some(action) = MenuAction::from_shortcut(ch) {
                    self.clear_status();
                    return self.start_action(action);
                }
            }
            _ => {}
        }
        Mode::Normal
    }

    fn start_action(&mut self, action: MenuAction) -> Mode {
        match action {
            MenuAction::Add => Mode::Adding(AttendeeForm::default()),
            MenuAction::Delete => {
                if self.attendees.is_empty() {
                    self.set_status("The guest list is empty.", NoticeKind::Error);
                    Mode::Normal
                } else {
                    Mode::Picking(AttendeePicker::new(self.attendees.clone()))
                }
            }
            MenuAction::Search => Mode::Searching(SearchForm::default()),
            MenuAction::Export => Mode::ChoosingFormat(FormatChoice::default()),
        }
    }

    fn handle_adding(&mut self, code: KeyCode, mut form: AttendeeForm) -> Mode {
        match code {
            KeyCode::Esc => return interrupted(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter if !form.is_last_field() => form.next_field(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok(attendee) => {
                    form.error = None;
                    return Mode::ConfirmAddition(ConfirmAddition { attendee, form });
                }
                Err(err) => form.error = Some(err.to_string()),
            },
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::Adding(form)
    }

    fn handle_confirm_addition(&mut self, code: KeyCode, confirm: ConfirmAddition) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => interrupted(),
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                match self.guests.add(&confirm.attendee) {
                    Ok(stored) => {
                        self.set_status(format!("Added {}.", stored.full_name()), NoticeKind::Info);
                        self.reload_attendees();
                        Mode::Notice(
                            Notice::info("Continue", vec!["Attendee created".to_string(), stored.to_string()]),
                            None,
                        )
                    }
                    Err(err) => {
                        let message = surface_error(&err);
                        self.set_status(message.clone(), NoticeKind::Error);
                        let mut form = confirm.form;
                        form.error = Some(message);
                        Mode::Adding(form)
                    }
                }
            }
            _ => Mode::ConfirmAddition(confirm),
        }
    }

    fn handle_picking(&mut self, code: KeyCode, mut picker: AttendeePicker) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Deletion cancelled.", NoticeKind::Info);
                return Mode::Normal;
            }
            KeyCode::Up => picker.move_selection(-1),
            KeyCode::Down => picker.move_selection(1),
            KeyCode::PageUp => picker.move_selection(-5),
            KeyCode::PageDown => picker.move_selection(5),
            KeyCode::Home => picker.select_first(),
            KeyCode::End => picker.select_last(),
            KeyCode::Backspace => picker.pop_filter_char(),
            KeyCode::Enter => {
                if let Some(attendee) = picker.current().cloned() {
                    return Mode::ConfirmDeletion(ConfirmDeletion { attendee });
                }
                self.set_status("No attendee selected.", NoticeKind::Error);
            }
            KeyCode::Char(ch) => picker.push_filter_char(ch),
            _ => {}
        }
        Mode::Picking(picker)
    }

    fn handle_confirm_deletion(&mut self, code: KeyCode, confirm: ConfirmDeletion) -> Mode {
        match code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
                self.set_status("Deletion cancelled.", NoticeKind::Info);
                Mode::Normal
            }
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => {
                let attendee = &confirm.attendee;
                match self.guests.remove(attendee.id) {
                    Ok(Removal::Removed) => {
                        self.set_status(format!("Deleted {}.", attendee.full_name()), NoticeKind::Info);
                        self.reload_attendees();
                        Mode::Notice(
                            Notice::info(
                                "Attendee deleted",
                                vec![format!("{attendee} was removed from the guest list.")],
                            ),
                            None,
                        )
                    }
                    Ok(Removal::NotFound) => {
                        self.reload_attendees();
                        Mode::Notice(
                            Notice::error(
                                "Attendee deleted",
                                vec![format!("{} was already gone from the guest list.", attendee.full_name())],
                            ),
                            None,
                        )
                    }
                    Err(err) => {
                        self.set_status(surface_error(&err), NoticeKind::Error);
                        Mode::ConfirmDeletion(confirm)
                    }
                }
            }
            _ => Mode::ConfirmDeletion(confirm),
        }
    }

    fn handle_searching(&mut self, code: KeyCode, mut form: SearchForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.clear_status();
                return Mode::Normal;
            }
            KeyCode::Backspace => {
                form.query.pop();
            }
            KeyCode::Enter => {
                if form.query.trim().is_empty() {
                    return Mode::Normal;
                }
                return self.run_search(form);
            }
            KeyCode::Char(ch) => {
                if !ch.is_control() {
                    form.query.push(ch);
                }
            }
            _ => {}
        }
        Mode::Searching(form)
    }

    fn run_search(&mut self, form: SearchForm) -> Mode {
        match self.guests.search(&form.query) {
            Ok(SearchOutcome::Matches(found)) => {
                Mode::Notice(Notice::attendee_details(&found), None)
            }
            Ok(SearchOutcome::NoMatches) => Mode::Notice(
                Notice::info(
                    "No matches",
                    vec![format!("Nobody on the guest list matches \"{}\".", form.query.trim())],
                ),
                None,
            ),
            Ok(SearchOutcome::TooMany(count)) => Mode::Notice(
                Notice::error(
                    "Try again",
                    vec![
                        format!("There are too many matching results ({count})!"),
                        String::new(),
                        "Try a more specific search.".to_string(),
                    ],
                ),
                Some(Box::new(Mode::Searching(form))),
            ),
            Err(err) => {
                self.set_status(surface_error(&err), NoticeKind::Error);
                Mode::Searching(form)
            }
        }
    }

    fn handle_choosing_format(&mut self, code: KeyCode, mut choice: FormatChoice) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Export cancelled.", NoticeKind::Info);
                return Mode::Normal;
            }
            KeyCode::Up | KeyCode::Left | KeyCode::BackTab => choice.move_selection(-1),
            KeyCode::Down | KeyCode::Right | KeyCode::Tab => choice.move_selection(1),
            KeyCode::Enter => return Mode::EnteringPath(PathForm::new(choice.current())),
            _ => {}
        }
        Mode::ChoosingFormat(choice)
    }

    fn handle_entering_path(&mut self, code: KeyCode, mut form: PathForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Export cancelled.", NoticeKind::Info);
                return Mode::Normal;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => {
                let destination = match form.destination() {
                    Ok(destination) => destination,
                    Err(_) => {
                        form.error = Some("Incorrect file name - try again!".to_string());
                        return Mode::EnteringPath(form);
                    }
                };
                match self.guests.export(form.format, &destination) {
                    Ok(report) => {
                        self.set_status(
                            format!("Exported {} attendees.", report.attendees),
                            NoticeKind::Info,
                        );
                        let lines = vec![
                            "List successfully exported to:".to_string(),
                            report.path.display().to_string(),
                        ];
                        return Mode::Notice(
                            Notice::info("List ready", lines).with_export(report.path),
                            None,
                        );
                    }
                    Err(err) => form.error = Some(surface_error(&err)),
                }
            }
            KeyCode::Char(ch) => {
                if form.push_char(ch) {
                    form.error = None;
                }
            }
            _ => {}
        }
        Mode::EnteringPath(form)
    }

    fn handle_notice(&mut self, code: KeyCode, mut notice: Notice, after: Option<Box<Mode>>) -> Mode {
        match code {
            KeyCode::Up => notice.scroll_by(-1),
            KeyCode::Down => notice.scroll_by(1),
            KeyCode::PageUp => notice.scroll_by(-10),
            KeyCode::PageDown => notice.scroll_by(10),
            KeyCode::Char('o') | KeyCode::Char('O') if notice.exported.is_some() => {
                if let Some(path) = notice.exported.as_deref() {
                    self.open_export(path);
                }
            }
            _ => return after.map(|mode| *mode).unwrap_or(Mode::Normal),
        }
        Mode::Notice(notice, after)
    }

    fn open_export(&mut self, path: &Path) {
        match open_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "opened exported file");
                self.set_status(format!("Opened {}.", path.display()), NoticeKind::Info);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to open exported file");
                self.set_status(format!("Failed to open file: {err}"), NoticeKind::Error);
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);
        let menu_height = (MENU_TILE_HEIGHT * self.menu_rows() as u16).min(area.height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(menu_height),
                Constraint::Min(0),
                Constraint::Length(footer_height),
            ])
            .split(area);

        self.draw_menu(frame, chunks[0]);
        self.draw_guest_list(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::Adding(form) => self.draw_attendee_form(frame, area, form),
            Mode::ConfirmAddition(confirm) => self.draw_confirm_addition(frame, area, confirm),
            Mode::Picking(picker) => self.draw_picker(frame, area, picker),
            Mode::ConfirmDeletion(confirm) => self.draw_confirm_deletion(frame, area, confirm),
            Mode::Searching(form) => self.draw_search_prompt(frame, area, form),
            Mode::ChoosingFormat(choice) => self.draw_format_choice(frame, area, choice),
            Mode::EnteringPath(form) => self.draw_path_form(frame, area, form),
            Mode::Notice(notice, _) => self.draw_notice(frame, area, notice),
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        for (row_idx, row_chunk) in self.split_rows(area).into_iter().enumerate() {
            for (col_idx, tile) in split_columns(row_chunk).into_iter().enumerate() {
                let index = row_idx * MENU_COLUMNS + col_idx;
                let Some(action) = MenuAction::ALL.get(index).copied() else {
                    continue;
                };
                let selected = index == self.selected;
                let mut block = Block::default().borders(Borders::ALL);
                if selected {
                    block = block.border_style(Style::default().fg(Color::Yellow));
                }
                let inner_width = tile.width.saturating_sub(2);
                let card = Paragraph::new(menu_tile_lines(action, inner_width, selected))
                    .block(block)
                    .wrap(Wrap { trim: true });
                frame.render_widget(card, tile);
            }
        }
    }

    fn draw_guest_list(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Guest list ({})", self.attendees.len()));

        if self.attendees.is_empty() {
            let message = Paragraph::new("No attendees yet. Press 'a' to add one.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = render_summaries(&self.attendees)
            .into_iter()
            .map(ListItem::new)
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), kind_style(status.kind))])
        } else {
            Line::from("")
        };

        let paragraph =
            Paragraph::new(vec![status_line, self.footer_instructions()]).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let pairs: &[(&str, &str)] = match &self.mode {
            Mode::Normal => &[
                ("[←↑↓→]", " Navigate   "),
                ("[Enter]", " Select   "),
                ("[a/d/s/e]", " Add/Delete/Search/Export   "),
                ("[r]", " Reload   "),
                ("[q]", " Quit"),
            ],
            Mode::Adding(_) => &[
                ("[Tab]", " Next field   "),
                ("[Enter]", " Next/Save   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::ConfirmAddition(_) | Mode::ConfirmDeletion(_) => {
                &[("[Y]", " Confirm   "), ("[N/Esc]", " Cancel")]
            }
            Mode::Picking(_) => &[
                ("[↑↓]", " Navigate   "),
                ("[type]", " Filter   "),
                ("[Enter]", " Delete   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Searching(_) | Mode::EnteringPath(_) => {
                &[("[Enter]", " Confirm   "), ("[Esc]", " Cancel")]
            }
            Mode::ChoosingFormat(_) => &[
                ("[↑↓]", " Choose   "),
                ("[Enter]", " Confirm   "),
                ("[Esc]", " Cancel"),
            ],
            Mode::Notice(notice, _) if notice.exported.is_some() => {
                &[("[o]", " Open file   "), ("[any key]", " Close")]
            }
            Mode::Notice(..) => &[("[↑↓]", " Scroll   "), ("[any key]", " Close")],
        };

        let spans: Vec<Span<'static>> = pairs
            .iter()
            .flat_map(|(key, text)| [Span::styled(*key, key_style), Span::raw(*text)])
            .collect();
        Line::from(spans)
    }

    fn draw_attendee_form(&self, frame: &mut Frame, area: Rect, form: &AttendeeForm) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("Add an attendee").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines: Vec<Line> = AttendeeField::ALL
            .iter()
            .map(|field| form.build_line(*field))
            .collect();
        lines.push(Line::from(""));

        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                "Enter on the last field to save • Tab to switch • Esc to cancel",
                Style::default().fg(Color::Gray),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);

        let row = AttendeeField::ALL
            .iter()
            .position(|field| *field == form.active)
            .unwrap_or(0) as u16;
        let prefix = form.active.label().len() as u16 + 2;
        frame.set_cursor_position((
            inner.x + prefix + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_confirm_addition(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmAddition) {
        let attendee = &confirm.attendee;
        let lines = vec![
            Line::from("Do you want to add this attendee to the guest list?"),
            Line::from(format!("    Name: {} {}", attendee.first_name, attendee.last_name)),
            Line::from(format!("    City: {}", attendee.city)),
            Line::from(format!("    Company: {}", attendee.company)),
            Line::from(format!("    Email: {}", attendee.email)),
            Line::from(format!("    Phone: {}", attendee.phone)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        draw_dialog(frame, area, "Confirmation", lines);
    }

    fn draw_confirm_deletion(&self, frame: &mut Frame, area: Rect, confirm: &ConfirmDeletion) {
        let lines = vec![
            Line::from(format!("Remove {}?", confirm.attendee)),
            Line::from(""),
            Line::from(Span::styled(
                "Press Y to confirm or N / Esc to cancel.",
                Style::default().fg(Color::Gray),
            )),
        ];
        draw_dialog(frame, area, "Confirm Removal", lines);
    }

    fn draw_picker(&self, frame: &mut Frame, area: Rect, picker: &AttendeePicker) {
        let popup_area = centered_rect(80, 70, area);
        frame.render_widget(Clear, popup_area);

        let title = if picker.filter.is_empty() {
            "Choose an attendee to delete".to_string()
        } else {
            format!("Choose an attendee to delete (filter: {})", picker.filter)
        };
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if picker.filtered.is_empty() {
            let message = Paragraph::new("No attendee matches the filter.")
                .alignment(Alignment::Center);
            frame.render_widget(message, inner);
            return;
        }

        let items: Vec<ListItem> = render_summaries(&picker.filtered)
            .into_iter()
            .map(ListItem::new)
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn draw_search_prompt(&self, frame: &mut Frame, area: Rect, form: &SearchForm) {
        let popup_area = centered_rect(60, 20, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().borders(Borders::ALL).title("Attendee info");
        let label = "Provide attendee's name (or its part): ";
        let paragraph = Paragraph::new(Span::raw(format!("{label}{}", form.query)))
            .block(block.clone())
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup_area);

        let inner = block.inner(popup_area);
        let cursor_x = inner.x + label.len() as u16 + form.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, inner.y));
    }

    fn draw_format_choice(&self, frame: &mut Frame, area: Rect, choice: &FormatChoice) {
        let popup_area = centered_rect(40, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title("File Format").borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = crate::export::ExportFormat::ALL
            .iter()
            .map(|format| ListItem::new(format!("{format} ({})", format.extension())))
            .collect();
        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(choice.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn draw_path_form(&self, frame: &mut Frame, area: Rect, form: &PathForm) {
        let popup_area = centered_rect(70, 30, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("Where do you want to save your {} file?", form.format.extension());
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let label = "File name: ";
        let mut lines = vec![
            Line::from(vec![
                Span::raw(label),
                Span::styled(form.value.clone(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    "The {} extension is added when missing.",
                    form.format.extension()
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
        frame.set_cursor_position((
            inner.x + label.len() as u16 + form.value.chars().count() as u16,
            inner.y,
        ));
    }

    fn draw_notice(&self, frame: &mut Frame, area: Rect, notice: &Notice) {
        let popup_area = centered_rect(70, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(notice.title.clone())
            .borders(Borders::ALL)
            .border_style(kind_style(notice.kind));
        let lines: Vec<Line> = notice
            .lines
            .iter()
            .map(|line| Line::from(line.clone()))
            .collect();
        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((notice.scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }

    fn split_rows(&self, area: Rect) -> Vec<Rect> {
        let rows = self.menu_rows();
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
            .split(area)
            .to_vec()
    }

    fn menu_rows(&self) -> usize {
        MenuAction::ALL.len().div_ceil(MENU_COLUMNS)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: NoticeKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Refresh the cached guest list. On failure the previous list stays on
    /// screen and the footer reports the error; returns whether it worked.
    fn reload_attendees(&mut self) -> bool {
        match self.guests.list() {
            Ok(attendees) => {
                self.attendees = attendees;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to reload the guest list");
                self.set_status(
                    format!("Could not reload the guest list: {}", surface_error(&err)),
                    NoticeKind::Error,
                );
                false
            }
        }
    }

    fn move_horizontal(&mut self, offset: isize) {
        let new_index = self.selected as isize + offset;
        let same_row = new_index.div_euclid(MENU_COLUMNS as isize)
            == (self.selected / MENU_COLUMNS) as isize;
        if same_row && (0..MenuAction::ALL.len() as isize).contains(&new_index) {
            self.selected = new_index as usize;
        }
    }

    fn move_vertical(&mut self, offset: isize) {
        let new_index = self.selected as isize + offset * MENU_COLUMNS as isize;
        if (0..MenuAction::ALL.len() as isize).contains(&new_index) {
            self.selected = new_index as usize;
        }
    }

    #[cfg(test)]
    fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }
}

/// Return to the menu after the user backs out of adding an attendee.
fn interrupted() -> Mode {
    Mode::Notice(
        Notice::info("Interrupted", vec!["Operation interrupted!".to_string()]),
        None,
    )
}

fn split_columns(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, MENU_COLUMNS as u32); MENU_COLUMNS])
        .split(area)
        .to_vec()
}

fn draw_dialog(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let popup_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup_area);

    let block = Block::default().title(title.to_string()).borders(Borders::ALL);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
