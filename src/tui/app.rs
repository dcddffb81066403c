use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::{Frame, Terminal};
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::form::{SubmissionTicket, View};
use crate::places::{AddressAutocomplete, SuggestionPanel};
use crate::submit::{BookingSink, PendingSubmission, SubmitError};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    BookingLayout, BookingState, Focus, HelpState, ThankYouState, draw_booking, draw_help,
    draw_thank_you,
};
use super::widgets::{PanelRow, StatusBarContext, draw_panel, draw_status_bar};

/// How long the event loop waits for input before polling background work.
const TICK_RATE: Duration = Duration::from_millis(100);

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// The booking form.
    Booking,
    /// Confirmation after a booking was accepted.
    ThankYou,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    booking: BookingState,
    thank_you: ThankYouState,
    help: HelpState,
    sink: Arc<dyn BookingSink>,
    runtime: Handle,
    pending: Option<PendingSubmission>,
    autocomplete: Option<AddressAutocomplete<SuggestionPanel>>,
    destination: String,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the booking form.
    ///
    /// Bookings go to `sink` on `runtime`; `destination` names it in the
    /// status bar.
    pub fn new(
        sink: Arc<dyn BookingSink>,
        destination: impl Into<String>,
        runtime: Handle,
        today: NaiveDate,
    ) -> Self {
        Self {
            screen: Screen::Booking,
            booking: BookingState::new(today),
            thank_you: ThankYouState::new(),
            help: HelpState::new(),
            sink,
            runtime,
            pending: None,
            autocomplete: None,
            destination: destination.into(),
            should_quit: false,
        }
    }

    /// Enables address suggestions on the booking form.
    pub fn with_autocomplete(mut self, mut autocomplete: AddressAutocomplete<SuggestionPanel>) -> Self {
        autocomplete.mount(self.booking.form().state().manual_entry);
        self.autocomplete = Some(autocomplete);
        self
    }

    /// Main event loop: poll background work → draw → wait for an event → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.tick(Local::now().date_naive());
            self.render(terminal)?;
            if !event::poll(TICK_RATE)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    /// Draws one frame and records where the booking controls landed.
    pub fn render<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut layout = None;
        terminal.draw(|frame| layout = self.draw(frame))?;
        if let Some(layout) = layout {
            self.booking.apply_layout(layout);
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) -> Option<BookingLayout> {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let layout = match self.screen {
            Screen::Booking => {
                let layout = draw_booking(&self.booking, frame, main_area);
                self.draw_suggestions(&layout, frame);
                Some(layout)
            }
            Screen::ThankYou => {
                draw_thank_you(&self.thank_you, frame, main_area);
                None
            }
            Screen::Help => {
                draw_help(&self.help, frame, main_area);
                None
            }
        };

        let ctx = StatusBarContext {
            destination: self.destination.clone(),
            lookup: self.autocomplete.as_ref().map(|a| a.status()),
            submission: self.booking.form().status(),
        };
        draw_status_bar(&ctx, frame, status_area);
        layout
    }

    #[mutants::skip]
    fn draw_suggestions(&self, layout: &BookingLayout, frame: &mut Frame) {
        if self.booking.focus() != Focus::Address {
            return;
        }
        let Some(panel) = self.autocomplete.as_ref().map(|a| a.widget()) else {
            return;
        };
        if !panel.is_open() {
            return;
        }
        let rows: Vec<PanelRow> = panel
            .suggestions()
            .iter()
            .map(|p| PanelRow::plain(p.formatted_address.clone()))
            .collect();
        draw_panel(&rows, panel.cursor(), layout.address, frame);
    }

    /// Applies work finished in the background since the last call.
    pub fn tick(&mut self, today: NaiveDate) {
        if let Some(pending) = self.pending.as_mut()
            && let Some(outcome) = pending.try_take()
        {
            let ticket = pending.ticket();
            self.pending = None;
            self.finish_submission(ticket, outcome);
        }
        if let Some(autocomplete) = self.autocomplete.as_mut() {
            autocomplete.poll_ready();
            autocomplete.widget_mut().drain();
        }
        self.booking.set_today(today);
    }

    fn finish_submission(&mut self, ticket: SubmissionTicket, outcome: Result<(), SubmitError>) {
        if !self.booking.form_mut().complete(ticket, outcome) {
            return;
        }
        if self.booking.form().view() != View::ThankYou {
            return;
        }
        // The form is unmounted while the thank-you view shows.
        if let Some(autocomplete) = self.autocomplete.as_mut() {
            autocomplete.teardown();
        }
        self.booking.reset_inputs();
        if self.screen == Screen::Help {
            self.help.set_origin(Screen::ThankYou);
        } else {
            self.screen = Screen::ThankYou;
        }
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                if self.screen != Screen::Help {
                    self.help.set_origin(self.screen);
                    self.help.reset();
                    self.screen = Screen::Help;
                }
                return;
            }
            _ => {}
        }

        if self.screen == Screen::Booking && self.handle_suggestion_key(key) {
            return;
        }

        let action = match self.screen {
            Screen::Booking => self.booking.handle_key(key),
            Screen::ThankYou => self.thank_you.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    /// Keys for the open suggestion list under the address field.
    /// Returns `true` if the key was consumed.
    fn handle_suggestion_key(&mut self, key: KeyEvent) -> bool {
        if self.booking.focus() != Focus::Address {
            return false;
        }
        let Some(autocomplete) = self.autocomplete.as_mut() else {
            return false;
        };
        if !autocomplete.widget().is_open() {
            return false;
        }
        match key.code {
            KeyCode::Up => autocomplete.widget_mut().move_cursor(-1),
            KeyCode::Down => autocomplete.widget_mut().move_cursor(1),
            KeyCode::Esc => autocomplete.widget_mut().dismiss(),
            KeyCode::Enter => {
                let chosen = autocomplete.widget_mut().choose();
                if let Some(address) = chosen.and_then(|event| autocomplete.accept(event)) {
                    self.booking.apply_place(address);
                }
            }
            _ => return false,
        }
        true
    }

    /// Handles a mouse event. Only left-button presses on the form matter.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen != Screen::Booking {
            return;
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let action = self
            .booking
            .pointer_down(Position::new(mouse.column, mouse.row));
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::Submit(submission) => {
                info!(ticket = ?submission.ticket, "sending booking");
                self.pending = Some(PendingSubmission::spawn(
                    &self.runtime,
                    Arc::clone(&self.sink),
                    submission,
                ));
            }
            Action::AddressEdited(text) => {
                if let Some(autocomplete) = self.autocomplete.as_mut()
                    && autocomplete.is_bound()
                {
                    autocomplete.widget_mut().request(&text);
                }
            }
            Action::ManualEntry(manual) => {
                debug!(manual, "manual address entry toggled");
                if let Some(autocomplete) = self.autocomplete.as_mut() {
                    autocomplete.set_manual_entry(manual);
                }
            }
            Action::BookAnother => {
                self.booking.form_mut().book_another();
                self.booking.reset_inputs();
                if let Some(autocomplete) = self.autocomplete.as_mut() {
                    autocomplete.mount(false);
                }
                self.screen = Screen::Booking;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn booking(&self) -> &BookingState {
        &self.booking
    }

    /// Returns `true` while a booking is being sent.
    pub fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crossterm::event::{KeyEventState, KeyModifiers};
    use futures::FutureExt;
    use futures::future::BoxFuture;
    use ratatui::backend::TestBackend;
    use tokio::runtime::Runtime;

    use super::*;
    use crate::form::SubmissionStatus;
    use crate::model::{BookingRequest, Field};
    use crate::places::{Place, PlaceLookup, PlacesError, ScriptLoader};

    #[derive(Default)]
    struct RecordingSink {
        requests: Mutex<Vec<BookingRequest>>,
    }

    impl BookingSink for RecordingSink {
        fn submit(&self, request: BookingRequest) -> BoxFuture<'static, Result<(), SubmitError>> {
            self.requests.lock().unwrap().push(request);
            async { Ok(()) }.boxed()
        }
    }

    struct RejectingSink;

    impl BookingSink for RejectingSink {
        fn submit(&self, _request: BookingRequest) -> BoxFuture<'static, Result<(), SubmitError>> {
            async { Err(SubmitError::Rejected { status: 422 }) }.boxed()
        }
    }

    struct StreetLookup;

    impl PlaceLookup for StreetLookup {
        fn autocomplete(&self, input: String) -> BoxFuture<'static, Result<Vec<Place>, PlacesError>> {
            async move {
                Ok(vec![
                    Place {
                        formatted_address: format!("{input} Street, Sydney NSW 2000"),
                    },
                    Place {
                        formatted_address: format!("{input} Avenue, Hobart TAS 7000"),
                    },
                ])
            }
            .boxed()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn make_app(rt: &Runtime, sink: Arc<dyn BookingSink>) -> App {
        App::new(sink, "outbox.jsonl", rt.handle().clone(), today())
    }

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        key(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    fn type_str(app: &mut App, s: &str) {
        for ch in s.chars() {
            app.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn tab_to(app: &mut App, focus: Focus) {
        for _ in 0..Focus::all().len() * 2 {
            if app.booking().focus() == focus {
                return;
            }
            app.handle_key(press(KeyCode::Tab));
        }
        panic!("could not reach {focus:?}");
    }

    fn fill_valid(app: &mut App) {
        let form = app.booking.form_mut();
        form.set_text(Field::Name, "Jo Citizen");
        form.set_text(Field::Phone, "0412345678");
        form.set_text(Field::Email, "jo@example.com");
        form.set_text(Field::Address, "1 George St, Sydney NSW 2000");
        form.set_text(Field::Message, "Hot water is out");
        form.toggle_service(crate::model::ServiceItem::Category(
            crate::model::ServiceCategory::HotWater,
        ));
        form.set_terms_accepted(true);
    }

    /// Ticks until `done` holds or a generous deadline passes.
    fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..400 {
            app.tick(today());
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("background work did not finish");
    }

    mod keys {
        use super::*;

        #[test]
        fn new_starts_on_booking() {
            let rt = runtime();
            let app = make_app(&rt, Arc::new(RecordingSink::default()));
            assert_eq!(app.screen(), Screen::Booking);
            assert!(!app.should_quit());
            assert!(!app.is_submitting());
        }

        #[test]
        fn ctrl_c_quits_anywhere() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.handle_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press));
            assert!(app.should_quit());
        }

        #[test]
        fn plain_c_is_typed() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.handle_key(press(KeyCode::Char('c')));
            assert!(!app.should_quit());
            assert_eq!(app.booking().form().state().name, "c");
        }

        #[test]
        fn release_events_are_ignored() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.handle_key(key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release));
            assert!(!app.should_quit());
        }

        #[test]
        fn esc_on_booking_quits() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.handle_key(press(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[test]
        fn f1_opens_help_and_esc_returns() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::F(1)));
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::Booking);
            assert!(!app.should_quit());
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn invalid_form_sends_nothing() {
            let rt = runtime();
            let sink = Arc::new(RecordingSink::default());
            let mut app = make_app(&rt, sink.clone());
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            assert!(!app.is_submitting());
            assert!(sink.requests.lock().unwrap().is_empty());
        }

        #[test]
        fn accepted_booking_shows_thank_you() {
            let rt = runtime();
            let sink = Arc::new(RecordingSink::default());
            let mut app = make_app(&rt, sink.clone());
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            assert!(app.is_submitting());
            assert_eq!(app.booking().form().status(), SubmissionStatus::Submitting);

            tick_until(&mut app, |app| app.screen() == Screen::ThankYou);
            assert!(!app.is_submitting());
            assert!(app.booking().form().state().is_empty());
            let requests = sink.requests.lock().unwrap();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].services, vec!["Hot Water"]);
        }

        #[test]
        fn double_enter_sends_one_booking() {
            let rt = runtime();
            let sink = Arc::new(RecordingSink::default());
            let mut app = make_app(&rt, sink.clone());
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::Enter));
            assert!(app.is_submitting());

            tick_until(&mut app, |app| app.screen() == Screen::ThankYou);
            assert_eq!(sink.requests.lock().unwrap().len(), 1);
        }

        #[test]
        fn rejected_booking_keeps_data_for_retry() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RejectingSink));
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));

            tick_until(&mut app, |app| !app.is_submitting());
            assert_eq!(app.screen(), Screen::Booking);
            assert_eq!(app.booking().form().status(), SubmissionStatus::Error);
            assert_eq!(app.booking().form().state().name, "Jo Citizen");
            assert!(app.booking().form().submission_error().is_some());
        }

        #[test]
        fn book_another_returns_to_empty_form() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            tick_until(&mut app, |app| app.screen() == Screen::ThankYou);

            app.handle_key(press(KeyCode::Enter));
            assert_eq!(app.screen(), Screen::Booking);
            assert_eq!(app.booking().form().status(), SubmissionStatus::Idle);
            assert_eq!(app.booking().focus(), Focus::Name);
            assert!(!app.booking().form().attempted_submit());
        }

        #[test]
        fn success_while_help_open_returns_to_thank_you() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            app.handle_key(press(KeyCode::F(1)));
            tick_until(&mut app, |app| app.booking().form().view() == View::ThankYou);
            assert_eq!(app.screen(), Screen::Help);
            app.handle_key(press(KeyCode::Esc));
            assert_eq!(app.screen(), Screen::ThankYou);
        }
    }

    mod autocomplete {
        use super::*;

        fn with_lookup(rt: &Runtime) -> (App, ScriptLoader) {
            let loader = ScriptLoader::new();
            let panel = SuggestionPanel::new(Arc::new(StreetLookup), rt.handle().clone());
            let autocomplete = AddressAutocomplete::new(panel, loader.subscribe());
            let app = make_app(rt, Arc::new(RecordingSink::default())).with_autocomplete(autocomplete);
            (app, loader)
        }

        #[test]
        fn binds_once_lookup_is_ready() {
            let rt = runtime();
            let (mut app, loader) = with_lookup(&rt);
            app.tick(today());
            assert!(!app.autocomplete.as_ref().unwrap().is_bound());
            loader.mark_ready();
            app.tick(today());
            assert!(app.autocomplete.as_ref().unwrap().is_bound());
        }

        #[test]
        fn choosing_a_suggestion_fills_address() {
            let rt = runtime();
            let (mut app, loader) = with_lookup(&rt);
            loader.mark_ready();
            app.tick(today());
            tab_to(&mut app, Focus::Address);
            type_str(&mut app, "Pitt");
            tick_until(&mut app, |app| {
                app.autocomplete.as_ref().is_some_and(|a| a.widget().is_open())
            });
            assert_eq!(
                app.autocomplete.as_ref().unwrap().widget().suggestions()[0].formatted_address,
                "Pitt Street, Sydney NSW 2000"
            );

            app.handle_key(press(KeyCode::Down));
            app.handle_key(press(KeyCode::Enter));
            assert_eq!(
                app.booking().form().state().address,
                "Pitt Avenue, Hobart TAS 7000"
            );
            assert!(!app.autocomplete.as_ref().unwrap().widget().is_open());
            assert_eq!(app.booking().focus(), Focus::Address);
        }

        #[test]
        fn manual_entry_stops_suggestions() {
            let rt = runtime();
            let (mut app, loader) = with_lookup(&rt);
            loader.mark_ready();
            app.tick(today());
            tab_to(&mut app, Focus::ManualEntry);
            app.handle_key(press(KeyCode::Char(' ')));
            assert!(app.booking().form().state().manual_entry);
            assert!(!app.autocomplete.as_ref().unwrap().is_bound());

            app.handle_key(press(KeyCode::BackTab));
            type_str(&mut app, "Pitt");
            app.tick(today());
            assert!(!app.autocomplete.as_ref().unwrap().widget().is_open());
            assert_eq!(app.booking().form().state().address, "Pitt");
        }

        #[test]
        fn thank_you_releases_binding_and_book_another_rebinds() {
            let rt = runtime();
            let (mut app, loader) = with_lookup(&rt);
            loader.mark_ready();
            app.tick(today());
            fill_valid(&mut app);
            tab_to(&mut app, Focus::Submit);
            app.handle_key(press(KeyCode::Enter));
            tick_until(&mut app, |app| app.screen() == Screen::ThankYou);
            assert!(!app.autocomplete.as_ref().unwrap().is_bound());

            app.handle_key(press(KeyCode::Enter));
            assert!(app.autocomplete.as_ref().unwrap().is_bound());
        }
    }

    mod rendering {
        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render(app: &mut App) -> String {
            let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
            app.render(&mut terminal).unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn booking_screen_with_status_bar() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            let output = render(&mut app);
            assert!(output.contains("Book Your Service"));
            assert!(output.contains("outbox.jsonl"));
            assert!(output.contains("lookup off"));
        }

        #[test]
        fn click_on_recorded_control_focuses_it() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            render(&mut app);
            let (_, terms) = *app
                .booking()
                .layout()
                .controls
                .iter()
                .find(|(f, _)| *f == Focus::Terms)
                .unwrap();
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: terms.x,
                row: terms.y,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.booking().focus(), Focus::Terms);
            assert!(app.booking().form().state().terms_accepted);
        }

        #[test]
        fn right_click_is_ignored() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            render(&mut app);
            let (_, phone) = app.booking().layout().controls[1];
            app.handle_mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Right),
                column: phone.x,
                row: phone.y,
                modifiers: KeyModifiers::NONE,
            });
            assert_eq!(app.booking().focus(), Focus::Name);
        }

        #[test]
        fn thank_you_screen_renders() {
            let rt = runtime();
            let mut app = make_app(&rt, Arc::new(RecordingSink::default()));
            app.screen = Screen::ThankYou;
            let output = render(&mut app);
            assert!(output.contains("Thank You!"));
        }
    }
}
