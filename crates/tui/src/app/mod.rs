use std::{
    sync::mpsc::{self, Receiver},
    time::Duration,
};

use chrono::Local;
use crossterm::event::{self, Event};
use engine::{Category, CategoryFilter, Ledger, LedgerEvent, Store, filter_expenses};
use tracing::{debug, info};

use crate::{
    error::{AppError, Result},
    quick_add,
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

/// Ticks a toast stays on screen (one tick per poll interval).
const TOAST_TICKS: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Form,
    QuickAdd,
    ConfirmClear,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Amount,
    Date,
    Category,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Amount,
        FormField::Date,
        FormField::Category,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Category => "Category",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Title => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
            Self::Category => Self::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Title => Self::Category,
            Self::Amount => Self::Title,
            Self::Date => Self::Amount,
            Self::Category => Self::Date,
        }
    }
}

#[derive(Debug)]
pub struct FormState {
    pub title: String,
    pub amount: String,
    pub date: String,
    pub category: Category,
    pub focus: FormField,
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            date: String::new(),
            category: Category::Food,
            focus: FormField::Title,
            error: None,
        }
    }
}

impl FormState {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Text buffer of the focused field; the category is picked, not typed.
    fn active_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Category => None,
        }
    }

    pub fn value(&self, field: FormField) -> String {
        match field {
            FormField::Title => self.title.clone(),
            FormField::Amount => self.amount.clone(),
            FormField::Date => self.date.clone(),
            FormField::Category => self.category.label().to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct QuickAddState {
    pub input: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    ticks_left: u8,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: Mode,
    pub filter: CategoryFilter,
    pub selected: usize,
    pub form: FormState,
    pub quick_add: QuickAddState,
    pub toast: Option<ToastState>,
    pub storage_label: String,
}

impl AppState {
    fn new(storage_label: String) -> Self {
        Self {
            mode: Mode::List,
            filter: CategoryFilter::All,
            selected: 0,
            form: FormState::default(),
            quick_add: QuickAddState::default(),
            toast: None,
            storage_label,
        }
    }

    fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            ticks_left: TOAST_TICKS,
        });
    }

    fn tick(&mut self) {
        let expired = match &mut self.toast {
            Some(toast) => {
                toast.ticks_left = toast.ticks_left.saturating_sub(1);
                toast.ticks_left == 0
            }
            None => false,
        };
        if expired {
            self.toast = None;
        }
    }
}

pub struct App<S> {
    ledger: Ledger<S>,
    events: Receiver<LedgerEvent>,
    pub state: AppState,
    should_quit: bool,
}

impl<S: Store> App<S> {
    pub fn new(mut ledger: Ledger<S>, storage_label: impl Into<String>) -> Self {
        let (tx, events) = mpsc::channel();
        ledger.subscribe(move |event, _| {
            let _ = tx.send(event.clone());
        });

        Self {
            ledger,
            events,
            state: AppState::new(storage_label.into()),
            should_quit: false,
        }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit() {
            terminal
                .draw(|frame| ui::render(frame, &self.state, self.ledger().expenses()))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_action(map_key(key));
                }
            } else {
                self.state.tick();
            }
        }

        info!("quitting");
        Ok(())
    }

    /// Applies one user action and refreshes derived view state.
    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
            return;
        }

        match self.state.mode {
            Mode::List => self.handle_list(action),
            Mode::Form => self.handle_form(action),
            Mode::QuickAdd => self.handle_quick_add(action),
            Mode::ConfirmClear => self.handle_confirm_clear(action),
            Mode::Help => {
                if matches!(
                    action,
                    AppAction::Cancel | AppAction::Submit | AppAction::Input('?' | 'q')
                ) {
                    self.state.mode = Mode::List;
                }
            }
        }

        self.after_action();
    }

    fn handle_list(&mut self, action: AppAction) {
        match action {
            AppAction::Input('q') => self.should_quit = true,
            AppAction::Input('a') => {
                self.state.form.error = None;
                self.state.mode = Mode::Form;
            }
            AppAction::Input(':') => {
                self.state.quick_add = QuickAddState::default();
                self.state.mode = Mode::QuickAdd;
            }
            AppAction::Input('f') | AppAction::Right => {
                self.state.filter = self.state.filter.next();
                self.state.selected = 0;
            }
            AppAction::Input('F') | AppAction::Left => {
                self.state.filter = self.state.filter.prev();
                self.state.selected = 0;
            }
            AppAction::Input('j') | AppAction::Down => self.select_next(),
            AppAction::Input('k') | AppAction::Up => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            AppAction::Input('d') | AppAction::Delete => self.remove_selected(),
            AppAction::Input('x') => {
                if self.ledger.is_empty() {
                    self.state.toast(ToastLevel::Info, "Nothing to clear.");
                } else {
                    self.state.mode = Mode::ConfirmClear;
                }
            }
            AppAction::Input('m') => {
                self.ledger.load_demo();
                self.state.selected = 0;
            }
            AppAction::Input('?') => self.state.mode = Mode::Help,
            _ => {}
        }
    }

    fn handle_form(&mut self, action: AppAction) {
        if action == AppAction::Submit {
            self.submit_form();
            return;
        }

        let form = &mut self.state.form;
        match action {
            AppAction::Cancel => {
                form.error = None;
                self.state.mode = Mode::List;
            }
            AppAction::NextField | AppAction::Down => form.focus = form.focus.next(),
            AppAction::PrevField | AppAction::Up => form.focus = form.focus.prev(),
            AppAction::Left if form.focus == FormField::Category => {
                form.category = form.category.prev();
            }
            AppAction::Right | AppAction::Input(' ') if form.focus == FormField::Category => {
                form.category = form.category.next();
            }
            AppAction::Reset => form.reset(),
            AppAction::Backspace => {
                if let Some(field) = form.active_field_mut() {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = form.active_field_mut() {
                    field.push(ch);
                }
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        let form = &mut self.state.form;
        match self
            .ledger
            .add(&form.title, &form.amount, &form.date, form.category)
        {
            Ok(_) => {
                form.reset();
                self.state.mode = Mode::List;
                self.state.selected = 0;
            }
            Err(err) => {
                debug!("form rejected: {err}");
                form.focus = match err {
                    engine::ValidationError::EmptyTitle => FormField::Title,
                    engine::ValidationError::InvalidAmount(_)
                    | engine::ValidationError::NegativeAmount => FormField::Amount,
                    engine::ValidationError::EmptyDate => FormField::Date,
                };
                form.error = Some(err.to_string());
            }
        }
    }

    fn handle_quick_add(&mut self, action: AppAction) {
        let quick = &mut self.state.quick_add;
        match action {
            AppAction::Cancel => {
                *quick = QuickAddState::default();
                self.state.mode = Mode::List;
            }
            AppAction::Backspace => {
                quick.input.pop();
            }
            AppAction::Input(ch) => quick.input.push(ch),
            AppAction::Submit => {
                let parsed = match quick_add::parse(&quick.input) {
                    Ok(parsed) => parsed,
                    Err(message) => {
                        quick.error = Some(message);
                        return;
                    }
                };
                let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
                match self
                    .ledger
                    .add(&parsed.title, &parsed.amount, &today, parsed.category)
                {
                    Ok(_) => {
                        *quick = QuickAddState::default();
                        self.state.mode = Mode::List;
                        self.state.selected = 0;
                    }
                    Err(err) => quick.error = Some(err.to_string()),
                }
            }
            _ => {}
        }
    }

    fn handle_confirm_clear(&mut self, action: AppAction) {
        match action {
            AppAction::Input('y' | 'Y') => {
                self.ledger.clear();
                self.state.selected = 0;
                self.state.mode = Mode::List;
            }
            AppAction::Input('n' | 'N') | AppAction::Cancel => {
                self.state.mode = Mode::List;
            }
            _ => {}
        }
    }

    fn visible_len(&self) -> usize {
        filter_expenses(self.ledger.expenses(), self.state.filter).len()
    }

    fn select_next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.state.selected = (self.state.selected + 1).min(len - 1);
    }

    fn remove_selected(&mut self) {
        let id = filter_expenses(self.ledger.expenses(), self.state.filter)
            .expenses
            .get(self.state.selected)
            .map(|expense| expense.id.clone());
        if let Some(id) = id {
            self.ledger.remove(&id);
        }
    }

    fn after_action(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let message = match &event {
                LedgerEvent::Added(expense) => {
                    format!("Added {} ({})", expense.title, expense.amount)
                }
                LedgerEvent::Removed(_) => "Expense deleted.".to_string(),
                LedgerEvent::Cleared { removed } => format!("Cleared {removed} expenses."),
                LedgerEvent::DemoLoaded { count } => format!("Loaded {count} demo expenses."),
            };
            self.state.toast(ToastLevel::Success, message);
        }

        if let Some(err) = self.ledger.take_notice() {
            self.state
                .toast(ToastLevel::Error, format!("Not saved: {err}"));
        }

        let len = self.visible_len();
        self.state.selected = self.state.selected.min(len.saturating_sub(1));
    }
}
