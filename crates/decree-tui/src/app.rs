//! Grid state, key handling and drawing.

use std::time::Instant;

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Wrap},
};

use decree_core::auth::EnvTokenProvider;
use decree_core::render::{Column, ContextAction};
use decree_core::session::Session;
use decree_core::status::NoticeLevel;
use decree_core::workflow::{Deletion, Promotion};

/// A confirmation waiting for y/n.
enum Dialog {
    Promote(Promotion),
    Delete(Deletion),
}

impl Dialog {
    fn title(&self) -> &'static str {
        match self {
            Dialog::Promote(_) => "Promote Policy Confirmation",
            Dialog::Delete(_) => "Delete Policy Confirmation",
        }
    }

    fn text(&self) -> String {
        match self {
            Dialog::Promote(promotion) => promotion.summary().confirmation_text(),
            Dialog::Delete(deletion) => deletion.confirmation_text(),
        }
    }

    fn action(&self) -> &'static str {
        match self {
            Dialog::Promote(_) => "Promote",
            Dialog::Delete(_) => "Delete",
        }
    }
}

pub struct App {
    session: Session<EnvTokenProvider>,
    table: TableState,
    menu: Option<ListState>,
    dialog: Option<Dialog>,
    details: Option<String>,
    loading: bool,
}

impl App {
    pub fn new(session: Session<EnvTokenProvider>) -> Self {
        Self {
            session,
            table: TableState::default(),
            menu: None,
            dialog: None,
            details: None,
            loading: false,
        }
    }

    /// Show the loading marker on the next frame.
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Load the directory and listing.
    pub async fn load(&mut self) {
        self.loading = true;
        self.details = None;
        self.session.load().await;
        self.loading = false;
        self.clamp_selection();
    }

    pub fn tick(&mut self) {
        self.session.board_mut().expire(Instant::now());
    }

    /// Returns false when the app should exit.
    pub async fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.dialog.is_some() {
            self.handle_dialog_key(code).await;
            return true;
        }
        if self.menu.is_some() {
            self.handle_menu_key(code).await;
            return true;
        }

        match code {
            KeyCode::Char('q') => return false,
            KeyCode::Esc => {
                if self.details.take().is_none() {
                    return false;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Enter | KeyCode::Char('o') => self.run_action(ContextAction::Open).await,
            KeyCode::Char('p') | KeyCode::Char('g') => self.run_action(ContextAction::Promote).await,
            KeyCode::Char('d') | KeyCode::Delete => self.run_action(ContextAction::Delete).await,
            KeyCode::Char('m') | KeyCode::Char(' ') => {
                if self.selected_id().is_some() {
                    self.menu = Some(ListState::default().with_selected(Some(0)));
                }
            }
            KeyCode::Char('r') => self.load().await,
            _ => {}
        }
        true
    }

    async fn handle_menu_key(&mut self, code: KeyCode) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.menu = None,
            KeyCode::Down | KeyCode::Char('j') => menu.select_next(),
            KeyCode::Up | KeyCode::Char('k') => menu.select_previous(),
            KeyCode::Enter => {
                let index = menu.selected().unwrap_or(0).min(ContextAction::ALL.len() - 1);
                self.menu = None;
                self.run_action(ContextAction::ALL[index]).await;
            }
            _ => {}
        }
    }

    async fn handle_dialog_key(&mut self, code: KeyCode) {
        let confirmed = match code {
            KeyCode::Char('y') | KeyCode::Enter => true,
            KeyCode::Char('n') | KeyCode::Esc => false,
            _ => return,
        };
        let Some(dialog) = self.dialog.take() else {
            return;
        };

        let result = match dialog {
            Dialog::Promote(mut promotion) => {
                let step = if confirmed {
                    promotion.confirm()
                } else {
                    promotion.cancel()
                };
                match step {
                    Ok(()) => self.session.promote(&mut promotion).await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
            Dialog::Delete(mut deletion) => {
                let step = if confirmed {
                    deletion.confirm()
                } else {
                    deletion.cancel()
                };
                match step {
                    Ok(()) => self.session.delete(&mut deletion).await.map(|_| ()),
                    Err(e) => Err(e),
                }
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "policy action failed");
            self.session.board_mut().error(e.to_string());
        }
        self.clamp_selection();
    }

    async fn run_action(&mut self, action: ContextAction) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let opened = match action {
            ContextAction::Open => self.session.details(id).map(|details| {
                self.details = Some(details);
            }),
            ContextAction::Promote => self
                .session
                .begin_promotion(id)
                .map(|promotion| self.dialog = Some(Dialog::Promote(promotion))),
            ContextAction::Delete => self
                .session
                .begin_deletion(id)
                .map(|deletion| self.dialog = Some(Dialog::Delete(deletion))),
        };
        if let Err(e) = opened {
            self.session.board_mut().error(e.to_string());
        }
    }

    fn selected_id(&self) -> Option<i64> {
        self.table
            .selected()
            .and_then(|index| self.session.policies().get(index))
            .map(|policy| policy.id)
    }

    fn select_next(&mut self) {
        let len = self.session.policies().len();
        if len == 0 {
            return;
        }
        let next = self.table.selected().map_or(0, |i| (i + 1).min(len - 1));
        self.table.select(Some(next));
    }

    fn select_previous(&mut self) {
        if self.session.policies().is_empty() {
            return;
        }
        let previous = self.table.selected().map_or(0, |i| i.saturating_sub(1));
        self.table.select(Some(previous));
    }

    fn clamp_selection(&mut self) {
        let len = self.session.policies().len();
        match (len, self.table.selected()) {
            (0, _) => self.table.select(None),
            (_, None) => self.table.select(Some(0)),
            (len, Some(i)) if i >= len => self.table.select(Some(len - 1)),
            _ => {}
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let details_height = if self.details.is_some() { 12 } else { 0 };
        let [header, grid, details, status, error, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(details_height),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(f.area());

        self.draw_header(f, header);
        self.draw_grid(f, grid);
        if let Some(text) = &self.details {
            let panel = Paragraph::new(text.as_str())
                .wrap(Wrap { trim: false })
                .block(Block::bordered().title("Policy Details"));
            f.render_widget(panel, details);
        }
        self.draw_messages(f, status, error);
        f.render_widget(
            Paragraph::new(
                "↑/↓ select  Enter open  m menu  p promote  d delete  r refresh  q quit",
            )
            .style(Style::default().fg(Color::DarkGray)),
            help,
        );

        if self.menu.is_some() {
            self.draw_menu(f, grid);
        }
        if let Some(dialog) = &self.dialog {
            draw_dialog(f, dialog);
        }
    }

    fn draw_header(&self, f: &mut Frame, area: Rect) {
        let loading = if self.loading { "  (loading…)" } else { "" };
        let line = Line::from(format!(
            "Project: {}   Total policies: {}{}",
            self.session.project(),
            self.session.total(),
            loading
        ))
        .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(Paragraph::new(line), area);
    }

    fn draw_grid(&mut self, f: &mut Frame, area: Rect) {
        let header = Row::new(Column::ALL.map(|column| Cell::from(column.header())))
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .session
            .policies()
            .iter()
            .map(|policy| Row::new(Column::ALL.map(|column| Cell::from(column.cell(policy)))))
            .collect();
        let widths = Column::ALL.map(|column| Constraint::Length(column.width()));

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::bordered().title("Policies"))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        f.render_stateful_widget(table, area, &mut self.table);
    }

    fn draw_messages(&self, f: &mut Frame, status: Rect, error: Rect) {
        let now = Instant::now();
        let board = self.session.board();

        if let Some(notice) = board.status_at(now) {
            let color = match notice.level {
                NoticeLevel::Success => Color::Green,
                _ => Color::Cyan,
            };
            f.render_widget(
                Paragraph::new(notice.text.as_str()).style(Style::default().fg(color)),
                status,
            );
        }
        if let Some(notice) = board.error_at(now) {
            f.render_widget(
                Paragraph::new(notice.text.as_str())
                    .wrap(Wrap { trim: true })
                    .style(Style::default().fg(Color::Red)),
                error,
            );
        }
    }

    fn draw_menu(&mut self, f: &mut Frame, grid: Rect) {
        let Some(state) = self.menu.as_mut() else {
            return;
        };
        let items: Vec<ListItem> = ContextAction::ALL
            .iter()
            .map(|action| {
                let label = if action.separated() {
                    format!("─ {}", action.label())
                } else {
                    action.label().to_string()
                };
                ListItem::new(label)
            })
            .collect();
        let list = List::new(items)
            .block(Block::bordered().title("Actions"))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let area = popup(grid, 40, ContextAction::ALL.len() as u16 + 2);
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, state);
    }
}

fn draw_dialog(f: &mut Frame, dialog: &Dialog) {
    let area = popup(f.area(), 70, 12);
    let body = format!("{}\n\n[y] {}   [n] Cancel", dialog.text(), dialog.action());
    let paragraph = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(dialog.title()));
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// A box centered in `area`, `width_pct` wide and `height` tall.
fn popup(area: Rect, width_pct: u16, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Percentage(width_pct),
        Constraint::Fill(1),
    ])
    .areas(middle);
    center
}
