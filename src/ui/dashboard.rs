// ============================================================================
// Dashboard - Rendu de l'interface principale
// ============================================================================
// Dessine la liste des comptes avec les widgets de ratatui
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Widgets : composants UI (Block, Paragraph, List)
// 3. Layout : découpage de l'espace en zones
// 4. Style : couleurs et attributs de texte
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::AccountRow;
use crate::prefs::PreferenceStore;
use crate::ui::icons::{icon_for, Icon};

/// Dessine l'interface complète
///
/// # Arguments
/// * `frame` - Surface de dessin ratatui
/// * `app` - État de l'application
pub fn render<S: PreferenceStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);
    render_accounts(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),       // Header : 3 lignes
            Constraint::Min(0),          // Content : tout le reste
            Constraint::Length(3),       // Footer : 3 lignes
        ])
        .split(area)
        .to_vec()  // Convertit Rc<[Rect]> en Vec<Rect>
}

// ============================================================================
// Header : mode d'affichage
// ============================================================================

/// Affiche "Bitcoin · BTC" ou "Bitcoin · USD ($)" selon le mode
fn render_header<S: PreferenceStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" WalletView ")
        .title_alignment(Alignment::Center);

    let currency = app.currency();
    let asset = currency.crypto_currency();

    let unit = if currency.is_displaying_crypto() {
        asset.symbol().to_string()
    } else {
        let fiat = currency.fiat_unit();
        match currency.currency_symbol(&fiat, &app.locale) {
            Ok(symbol) => format!("{} ({})", fiat, symbol),
            Err(_) => fiat,
        }
    };

    let mut spans = vec![
        Span::styled(
            asset.label(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" · "),
        Span::styled(unit, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    ];

    if app.show_all_assets {
        spans.push(Span::styled("  [all assets]", Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Main Content : liste des comptes
// ============================================================================

fn render_accounts<S: PreferenceStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Accounts ");

    let rows = app.rows(icon_for);

    if rows.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("No {} account", app.currency().crypto_currency().label()),
                Style::default().fg(Color::Gray),
            )),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| list_item(row, index == app.selected_index))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Convertit une AccountRow en ListItem stylé
///
/// Les comptes archivés sont grisés, la sélection est en inversé.
fn list_item(row: &AccountRow<Icon>, selected: bool) -> ListItem<'static> {
    let icon = row.icon();

    let text_style = if row.is_archived() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", icon.glyph), Style::default().fg(icon.color)),
        Span::styled(row.display(), text_style),
    ]);

    let mut style = Style::default();
    if selected {
        style = style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED);
    }

    ListItem::new(line).style(style)
}

// ============================================================================
// Footer : raccourcis, confirmation, statut
// ============================================================================

fn render_footer<S: PreferenceStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", key_style),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(" again to quit, any other key to cancel ⚠", key_style),
        ])
    } else if let Some(message) = app.loading_message.as_ref().filter(|_| app.is_loading_data()) {
        Line::from(Span::styled(message.clone(), Style::default().fg(Color::Cyan)))
    } else if let Some(message) = &app.status_message {
        Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
    } else {
        Line::from(vec![
            Span::styled("[q]", key_style),
            Span::raw(" Quit  "),
            Span::styled("[↑↓]", key_style),
            Span::raw(" Move  "),
            Span::styled("[c]", key_style),
            Span::raw(" Crypto/Fiat  "),
            Span::styled("[t]", key_style),
            Span::raw(" BTC/ETH  "),
            Span::styled("[f]", key_style),
            Span::raw(" Fiat  "),
            Span::styled("[s]", key_style),
            Span::raw(" All  "),
            Span::styled("[x/w/m]", key_style),
            Span::raw(" Archive/Watch/Default  "),
            Span::styled("[r]", key_style),
            Span::raw(" Refresh"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
