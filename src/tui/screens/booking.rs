//! Booking screen: the form a customer fills in to request a service.

use chrono::{Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use tui_textarea::TextArea;

use crate::form::{BookingFormController, Dropdown, SubmissionStatus, SubmitBlocked};
use crate::model::{
    Attachment, DateRange, Field, PreferredDate, PreferredTime, ServiceCategory, ServiceItem,
    Urgency,
};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::{
    ControlState, PanelRow, draw_checkbox, draw_error_line, draw_panel, draw_text_input,
    draw_trigger, edit_line,
};

/// A focusable control on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Phone,
    Email,
    Address,
    ManualEntry,
    Services,
    PreferredTime,
    Urgency,
    PreferredDate,
    Message,
    Attachments,
    Newsletter,
    Terms,
    Submit,
}

static FOCUS_ORDER: &[Focus] = &[
    Focus::Name,
    Focus::Phone,
    Focus::Email,
    Focus::Address,
    Focus::ManualEntry,
    Focus::Services,
    Focus::PreferredTime,
    Focus::Urgency,
    Focus::PreferredDate,
    Focus::Message,
    Focus::Attachments,
    Focus::Newsletter,
    Focus::Terms,
    Focus::Submit,
];

impl Focus {
    pub fn all() -> &'static [Focus] {
        FOCUS_ORDER
    }

    /// The form field edited as text while this control has focus.
    fn text_field(self) -> Option<Field> {
        match self {
            Focus::Name => Some(Field::Name),
            Focus::Phone => Some(Field::Phone),
            Focus::Email => Some(Field::Email),
            Focus::Address => Some(Field::Address),
            Focus::Message => Some(Field::Message),
            _ => None,
        }
    }

    fn dropdown(self) -> Option<Dropdown> {
        match self {
            Focus::Services => Some(Dropdown::Services),
            Focus::PreferredTime => Some(Dropdown::Time),
            Focus::Urgency => Some(Dropdown::Urgency),
            Focus::PreferredDate => Some(Dropdown::Date),
            _ => None,
        }
    }

    fn for_field(field: Field) -> Option<Focus> {
        match field {
            Field::Name => Some(Focus::Name),
            Field::Phone => Some(Focus::Phone),
            Field::Email => Some(Focus::Email),
            Field::Address => Some(Focus::Address),
            Field::Services => Some(Focus::Services),
            Field::Message => Some(Focus::Message),
            Field::TermsAccepted => Some(Focus::Terms),
            _ => None,
        }
    }
}

/// Screen regions recorded while drawing, used to route mouse clicks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingLayout {
    /// Clickable controls.
    pub controls: Vec<(Focus, Rect)>,
    /// Trigger plus open panel for each dropdown.
    pub containers: Vec<(Dropdown, Rect)>,
    /// The address input, for anchoring suggestions.
    pub address: Rect,
}

/// Rows in the services dropdown: each category, followed by its services
/// when expanded.
fn service_rows(form: &BookingFormController) -> Vec<ServiceItem> {
    let mut rows = Vec::new();
    for category in ServiceCategory::all() {
        rows.push(ServiceItem::Category(*category));
        if form.expansion().is_expanded(*category) {
            rows.extend(category.services().iter().map(|s| ServiceItem::Service(*s)));
        }
    }
    rows
}

/// The date dropdown lists the loose ranges and then one specific-day row.
fn date_row_count() -> usize {
    DateRange::all().len() + 1
}

fn format_day(date: NaiveDate) -> String {
    date.format("%a %-d %b %Y").to_string()
}

fn message_area() -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default());
    textarea
}

/// State for the booking screen.
#[derive(Debug, Clone)]
pub struct BookingState {
    form: BookingFormController,
    focus: Focus,
    message: TextArea<'static>,
    attachments_input: String,
    services_cursor: usize,
    time_cursor: usize,
    urgency_cursor: usize,
    date_cursor: usize,
    specific_date: NaiveDate,
    today: NaiveDate,
    layout: BookingLayout,
}

impl BookingState {
    /// Creates an empty form with focus on the name field.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: BookingFormController::new(),
            focus: Focus::Name,
            message: message_area(),
            attachments_input: String::new(),
            services_cursor: 0,
            time_cursor: 0,
            urgency_cursor: 0,
            date_cursor: 0,
            specific_date: today,
            today,
            layout: BookingLayout::default(),
        }
    }

    pub fn form(&self) -> &BookingFormController {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingFormController {
        &mut self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn attachments_input(&self) -> &str {
        &self.attachments_input
    }

    /// Regions from the last draw.
    pub fn layout(&self) -> &BookingLayout {
        &self.layout
    }

    /// Updates the earliest pickable date.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
        if self.specific_date < today {
            self.specific_date = today;
        }
    }

    /// Clears screen-local inputs after the form itself was reset.
    pub fn reset_inputs(&mut self) {
        self.message = message_area();
        self.attachments_input.clear();
        self.focus = Focus::Name;
        self.services_cursor = 0;
        self.time_cursor = 0;
        self.urgency_cursor = 0;
        self.date_cursor = 0;
        self.specific_date = self.today;
    }

    /// Writes an address picked from suggestions and validates it.
    pub fn apply_place(&mut self, address: String) {
        self.form.apply_place(address);
    }

    /// Stores the regions of the last draw.
    pub fn apply_layout(&mut self, layout: BookingLayout) {
        let dropdowns = self.form.dropdowns_mut();
        for dropdown in Dropdown::all() {
            let area = layout
                .containers
                .iter()
                .find(|(d, _)| d == dropdown)
                .map(|(_, r)| *r);
            dropdowns.set_container(*dropdown, area);
        }
        self.layout = layout;
    }

    /// Left mouse button pressed at `pos`.
    ///
    /// Dropdowns not containing `pos` close first; a click on a control
    /// then focuses and activates it.
    pub fn pointer_down(&mut self, pos: Position) -> Action {
        self.form.dropdowns_mut().pointer_down(pos);
        let dropdowns = self.form.dropdowns();
        let over_panel = Dropdown::all().iter().copied().find(|d| {
            dropdowns.is_open(*d) && dropdowns.container(*d).is_some_and(|r| r.contains(pos))
        });
        let hit = self
            .layout
            .controls
            .iter()
            .find(|(_, area)| area.contains(pos))
            .map(|(focus, _)| *focus);
        let Some(focus) = hit else {
            return Action::None;
        };
        // Controls under an open panel are covered by it.
        if let Some(open) = over_panel
            && focus.dropdown() != Some(open)
        {
            return Action::None;
        }
        self.set_focus(focus);
        if focus.text_field().is_some() || focus == Focus::Attachments {
            Action::None
        } else {
            self.activate()
        }
    }

    fn focusable(&self, focus: Focus) -> bool {
        focus != Focus::ManualEntry || self.form.show_manual_entry()
    }

    fn move_focus(&mut self, forward: bool) {
        let order = Focus::all();
        let len = order.len();
        let mut pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        loop {
            pos = if forward {
                (pos + 1) % len
            } else {
                (pos + len - 1) % len
            };
            if self.focusable(order[pos]) {
                break;
            }
        }
        self.set_focus(order[pos]);
    }

    /// Moves focus, running blur validation on the control being left.
    fn set_focus(&mut self, next: Focus) {
        if next == self.focus {
            return;
        }
        if let Some(field) = self.focus.text_field() {
            self.form.blur(field);
        }
        if self.focus == Focus::Message {
            self.message.set_cursor_style(Style::default());
        }
        self.focus = next;
        match next {
            Focus::Address => self.form.focus_address(),
            Focus::Message => self
                .message
                .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED)),
            _ => {}
        }
    }

    fn submit(&mut self) -> Action {
        match self.form.submit() {
            Ok(submission) => Action::Submit(submission),
            Err(SubmitBlocked::Invalid(_)) => {
                let first = self.form.errors().fields().find_map(Focus::for_field);
                if let Some(focus) = first {
                    self.set_focus(focus);
                }
                Action::None
            }
            Err(_) => Action::None,
        }
    }

    /// Space/Enter on a non-text control.
    fn activate(&mut self) -> Action {
        if let Some(dropdown) = self.focus.dropdown() {
            self.form.dropdowns_mut().toggle(dropdown);
            return Action::None;
        }
        match self.focus {
            Focus::ManualEntry => {
                let manual = !self.form.state().manual_entry;
                self.form.set_manual_entry(manual);
                Action::ManualEntry(manual)
            }
            Focus::Newsletter => {
                let subscribed = !self.form.state().newsletter;
                self.form.set_newsletter(subscribed);
                Action::None
            }
            Focus::Terms => {
                let accepted = !self.form.state().terms_accepted;
                self.form.set_terms_accepted(accepted);
                Action::None
            }
            Focus::Submit => self.submit(),
            _ => Action::None,
        }
    }

    fn handle_line_input(&mut self, field: Field, key: KeyEvent) -> Action {
        if key.code == KeyCode::Enter {
            self.move_focus(true);
            return Action::None;
        }
        let mut value = self.form.state().text(field).unwrap_or_default().to_string();
        if !edit_line(&mut value, key) {
            return Action::None;
        }
        self.form.set_text(field, value.clone());
        if field == Field::Address {
            Action::AddressEdited(value)
        } else {
            Action::None
        }
    }

    fn handle_message(&mut self, key: KeyEvent) -> Action {
        if self.message.input(key) {
            let text = self.message.lines().join("\n");
            self.form.set_text(Field::Message, text);
        }
        Action::None
    }

    fn handle_attachments(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Enter {
            let files = self
                .attachments_input
                .split(';')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(Attachment::new)
                .collect();
            self.form.attach_files(files);
            return Action::None;
        }
        edit_line(&mut self.attachments_input, key);
        Action::None
    }

    fn handle_dropdown(&mut self, dropdown: Dropdown, key: KeyEvent) -> Action {
        if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
            self.clear_dropdown_value(dropdown);
            return Action::None;
        }
        if !self.form.dropdowns().is_open(dropdown) {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down) {
                self.form.dropdowns_mut().set_open(dropdown, true);
            }
            return Action::None;
        }
        match dropdown {
            Dropdown::Services => self.handle_services_key(key),
            Dropdown::Time => {
                let chosen = pick(&mut self.time_cursor, PreferredTime::all(), key);
                if let Some(time) = chosen {
                    self.form.set_preferred_time(Some(time));
                    self.form.dropdowns_mut().set_open(Dropdown::Time, false);
                }
            }
            Dropdown::Urgency => {
                let chosen = pick(&mut self.urgency_cursor, Urgency::all(), key);
                if let Some(urgency) = chosen {
                    self.form.set_urgency(Some(urgency));
                    self.form.dropdowns_mut().set_open(Dropdown::Urgency, false);
                }
            }
            Dropdown::Date => self.handle_date_key(key),
        }
        Action::None
    }

    fn clear_dropdown_value(&mut self, dropdown: Dropdown) {
        match dropdown {
            Dropdown::Services => {
                for item in self.form.state().services.clone() {
                    self.form.set_service(item, false);
                }
            }
            Dropdown::Time => self.form.set_preferred_time(None),
            Dropdown::Urgency => self.form.set_urgency(None),
            Dropdown::Date => self.form.clear_preferred_date(),
        }
    }

    fn handle_services_key(&mut self, key: KeyEvent) {
        let rows = service_rows(&self.form);
        let Some(&item) = rows.get(self.services_cursor) else {
            self.services_cursor = 0;
            return;
        };
        match (key.code, item) {
            (KeyCode::Up, _) => self.services_cursor = self.services_cursor.saturating_sub(1),
            (KeyCode::Down, _) => {
                self.services_cursor = (self.services_cursor + 1).min(rows.len() - 1);
            }
            (KeyCode::Char(' '), _) | (KeyCode::Enter, ServiceItem::Service(_)) => {
                self.form.toggle_service(item);
            }
            (KeyCode::Enter, ServiceItem::Category(category)) => {
                self.form.expansion_mut().toggle(category);
            }
            (KeyCode::Right, ServiceItem::Category(category)) => {
                if !self.form.expansion().is_expanded(category) {
                    self.form.expansion_mut().toggle(category);
                }
            }
            (KeyCode::Left, ServiceItem::Category(category)) => {
                if self.form.expansion().is_expanded(category) {
                    self.form.expansion_mut().toggle(category);
                }
            }
            (KeyCode::Left, ServiceItem::Service(service)) => {
                // Collapse the parent and land on its header.
                let category = service.category();
                self.form.expansion_mut().toggle(category);
                self.services_cursor = service_rows(&self.form)
                    .iter()
                    .position(|r| *r == ServiceItem::Category(category))
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    fn handle_date_key(&mut self, key: KeyEvent) {
        let specific_row = DateRange::all().len();
        match key.code {
            KeyCode::Up => self.date_cursor = self.date_cursor.saturating_sub(1),
            KeyCode::Down => self.date_cursor = (self.date_cursor + 1).min(date_row_count() - 1),
            KeyCode::Left if self.date_cursor == specific_row => {
                if let Some(earlier) = self.specific_date.checked_sub_days(Days::new(1))
                    && earlier >= self.today
                {
                    self.specific_date = earlier;
                }
            }
            KeyCode::Right if self.date_cursor == specific_row => {
                if let Some(later) = self.specific_date.checked_add_days(Days::new(1)) {
                    self.specific_date = later;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let picked = match DateRange::all().get(self.date_cursor) {
                    Some(range) => {
                        self.form.select_date_range(*range);
                        true
                    }
                    None => self.form.select_date(self.specific_date, self.today),
                };
                if picked {
                    self.form.dropdowns_mut().set_open(Dropdown::Date, false);
                }
            }
            _ => {}
        }
    }
}

/// Moves `cursor` through `options` with the arrow keys; Enter or Space
/// returns the option under it.
fn pick<T: Copy>(cursor: &mut usize, options: &[T], key: KeyEvent) -> Option<T> {
    match key.code {
        KeyCode::Up => {
            *cursor = cursor.saturating_sub(1);
            None
        }
        KeyCode::Down => {
            *cursor = (*cursor + 1).min(options.len().saturating_sub(1));
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => options.get(*cursor).copied(),
        _ => None,
    }
}

impl ScreenState for BookingState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab => {
                self.move_focus(true);
                return Action::None;
            }
            KeyCode::BackTab => {
                self.move_focus(false);
                return Action::None;
            }
            KeyCode::Esc => {
                if self.form.dropdowns().any_open() {
                    self.form.dropdowns_mut().close_all();
                    return Action::None;
                }
                return Action::Quit;
            }
            _ => {}
        }

        if let Some(dropdown) = self.focus.dropdown() {
            return self.handle_dropdown(dropdown, key);
        }
        match self.focus {
            Focus::Message => self.handle_message(key),
            Focus::Attachments => self.handle_attachments(key),
            focus => match focus.text_field() {
                Some(field) => self.handle_line_input(field, key),
                None if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) => self.activate(),
                None => Action::None,
            },
        }
    }
}

// --- Rendering ---

fn control(state: &BookingState, focus: Focus, field: Option<Field>) -> ControlState {
    ControlState {
        focused: state.focus == focus,
        has_error: field.is_some_and(|f| state.form.visible_error(f).is_some()),
    }
}

#[mutants::skip]
fn draw_text(
    state: &BookingState,
    focus: Focus,
    field: Field,
    frame: &mut Frame,
    area: Rect,
) {
    let value = state.form.state().text(field).unwrap_or_default();
    let error = state.form.visible_error(field);
    draw_text_input(
        field.label(),
        value,
        true,
        error.as_deref(),
        control(state, focus, Some(field)),
        frame,
        area,
    );
}

#[mutants::skip]
fn draw_dropdown_trigger(
    state: &BookingState,
    focus: Focus,
    field: Field,
    frame: &mut Frame,
    area: Rect,
) {
    let form_state = state.form.state();
    let (summary, placeholder) = match field {
        Field::Services => (state.form.services_summary(), form_state.services.is_empty()),
        Field::PreferredTime => match form_state.preferred_time {
            Some(time) => (time.label().to_string(), false),
            None => ("Preferred Time".to_string(), true),
        },
        Field::Urgency => match form_state.urgency {
            Some(urgency) => (urgency.label().to_string(), false),
            None => ("How Urgent Is This?".to_string(), true),
        },
        _ => match form_state.preferred_date.display() {
            Some(text) => (text, false),
            None => ("Preferred Date".to_string(), true),
        },
    };
    let open = focus
        .dropdown()
        .is_some_and(|d| state.form.dropdowns().is_open(d));
    let error = state.form.visible_error(field);
    draw_trigger(
        &summary,
        placeholder,
        open,
        error.as_deref(),
        control(state, focus, Some(field)),
        frame,
        area,
    );
}

fn panel_rows(state: &BookingState, dropdown: Dropdown) -> (Vec<PanelRow>, usize) {
    let form_state = state.form.state();
    match dropdown {
        Dropdown::Services => {
            let rows = service_rows(&state.form)
                .into_iter()
                .map(|item| {
                    let checked = form_state.services.contains(&item);
                    match item {
                        ServiceItem::Category(category) => PanelRow::checkbox(item.label(), checked)
                            .expandable(state.form.expansion().is_expanded(category)),
                        ServiceItem::Service(_) => {
                            PanelRow::checkbox(item.label(), checked).indented(4)
                        }
                    }
                })
                .collect();
            (rows, state.services_cursor)
        }
        Dropdown::Time => {
            let rows = PreferredTime::all()
                .iter()
                .map(|t| PanelRow::checkbox(t.label(), form_state.preferred_time == Some(*t)))
                .collect();
            (rows, state.time_cursor)
        }
        Dropdown::Urgency => {
            let rows = Urgency::all()
                .iter()
                .map(|u| PanelRow::checkbox(u.label(), form_state.urgency == Some(*u)))
                .collect();
            (rows, state.urgency_cursor)
        }
        Dropdown::Date => {
            let mut rows: Vec<PanelRow> = DateRange::all()
                .iter()
                .map(|r| {
                    PanelRow::checkbox(
                        r.label(),
                        form_state.preferred_date == PreferredDate::Range(*r),
                    )
                })
                .collect();
            let picked = form_state.preferred_date == PreferredDate::Specific(state.specific_date);
            rows.push(PanelRow::checkbox(
                format!("\u{2039} {} \u{203a}", format_day(state.specific_date)),
                picked,
            ));
            (rows, state.date_cursor)
        }
    }
}

/// Renders the booking screen and returns where its controls ended up.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_booking(state: &BookingState, frame: &mut Frame, area: Rect) -> BookingLayout {
    let block = Block::default()
        .title(" Book Your Service ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [columns_area, message_area, button_area, error_area, footer_area] =
        Layout::vertical([
            Constraint::Length(16),
            Constraint::Min(4),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(columns_area);

    let [name_area, phone_area, email_area, address_area, manual_area, attach_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .areas(left);
    let [services_area, time_area, urgency_area, date_area, newsletter_area, terms_area] =
        Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(right);

    let mut layout = BookingLayout {
        address: address_area,
        ..BookingLayout::default()
    };

    draw_text(state, Focus::Name, Field::Name, frame, name_area);
    draw_text(state, Focus::Phone, Field::Phone, frame, phone_area);
    draw_text(state, Focus::Email, Field::Email, frame, email_area);
    draw_text(state, Focus::Address, Field::Address, frame, address_area);
    layout.controls.extend([
        (Focus::Name, name_area),
        (Focus::Phone, phone_area),
        (Focus::Email, email_area),
        (Focus::Address, address_area),
    ]);

    if state.form.show_manual_entry() {
        let manual = Rect {
            x: manual_area.x + 1,
            ..manual_area
        };
        draw_checkbox(
            "Manual Entry",
            state.form.state().manual_entry,
            None,
            control(state, Focus::ManualEntry, None),
            frame,
            manual,
        );
        layout.controls.push((Focus::ManualEntry, manual));
    }

    let attach_label = match state.form.attachment_hint() {
        Some(hint) => format!("Attachments ({hint})"),
        None => "Attachments (paths separated by ;)".to_string(),
    };
    draw_text_input(
        &attach_label,
        &state.attachments_input,
        false,
        None,
        control(state, Focus::Attachments, None),
        frame,
        attach_area,
    );
    layout.controls.push((Focus::Attachments, attach_area));

    let triggers = [
        (Focus::Services, Field::Services, services_area),
        (Focus::PreferredTime, Field::PreferredTime, time_area),
        (Focus::Urgency, Field::Urgency, urgency_area),
        (Focus::PreferredDate, Field::PreferredDate, date_area),
    ];
    for (focus, field, trigger_area) in triggers {
        draw_dropdown_trigger(state, focus, field, frame, trigger_area);
        layout.controls.push((focus, trigger_area));
    }

    let newsletter = Rect {
        x: newsletter_area.x + 1,
        ..newsletter_area
    };
    draw_checkbox(
        "Keep me updated with news and special offers",
        state.form.state().newsletter,
        None,
        control(state, Focus::Newsletter, None),
        frame,
        newsletter,
    );
    let terms = Rect {
        x: terms_area.x + 1,
        ..terms_area
    };
    let terms_error = state.form.visible_error(Field::TermsAccepted);
    draw_checkbox(
        "I accept the terms and conditions",
        state.form.state().terms_accepted,
        terms_error.as_deref(),
        control(state, Focus::Terms, Some(Field::TermsAccepted)),
        frame,
        terms,
    );
    layout.controls.extend([(Focus::Newsletter, newsletter), (Focus::Terms, terms)]);

    let message_control = control(state, Focus::Message, Some(Field::Message));
    let message_block = Block::default()
        .title("Message *")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(message_control.border_color()));
    frame.render_widget(&message_block, message_area);
    frame.render_widget(&state.message, message_block.inner(message_area));
    if let Some(error) = state.form.visible_error(Field::Message) {
        draw_error_line(&error, frame, message_area);
    }
    layout.controls.push((Focus::Message, message_area));

    let status = state.form.status();
    let button_style = match (status, state.focus == Focus::Submit) {
        (SubmissionStatus::Submitting, _) => Style::default().fg(Color::DarkGray),
        (_, true) => Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
        (_, false) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    };
    let label = format!("[ {} ]", status.button_label());
    let button_width = label.chars().count() as u16;
    let button_rect = Rect {
        x: button_area.x + button_area.width.saturating_sub(button_width) / 2,
        width: button_width.min(button_area.width),
        ..button_area
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label, button_style)),
        button_rect,
    );
    layout.controls.push((Focus::Submit, button_rect));

    if let Some(message) = state.form.submission_error() {
        frame.render_widget(
            Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .alignment(Alignment::Center),
            error_area,
        );
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: move  Space/Enter: select  \u{2191}/\u{2193}: choose  F1: help  Esc: close/quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);

    // Open panels last so they overlay the controls below them.
    for (focus, _, trigger_area) in triggers {
        let Some(dropdown) = focus.dropdown() else {
            continue;
        };
        let container = if state.form.dropdowns().is_open(dropdown) {
            let (rows, cursor) = panel_rows(state, dropdown);
            let panel = draw_panel(&rows, cursor, trigger_area, frame);
            trigger_area.union(panel)
        } else {
            trigger_area
        };
        layout.containers.push((dropdown, container));
    }

    layout
}
