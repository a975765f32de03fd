use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use tui::{Frame, Terminal};

use crate::app::App;
use crate::components::accent_color;
use crate::components::card_grid::{Card, CardGrid, columns_for};
use crate::components::strip::ButtonStrip;
use crate::route::Route;
use crate::state::app_state::{
    AppState, GameDetailState, LoadState, PlayerGamesState, RosterState, Strip, View,
};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::state::playback::{PlaybackStatus, VideoPlayer};
use crate::ui::layout::LayoutAreas;
use hoop_api::stats::{CARD_PLACEHOLDER, compact_stat_line, stat_label};
use hoop_api::storage::{Bucket, GameAssets};
use hoop_api::{GameCard, Totals, split_matchup};

const ROSTER_CARD_HEIGHT: u16 = 6;
const GAME_CARD_HEIGHT: u16 = 8;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, &app.state);
        }

        let bucket = &app.settings.bucket;
        match &mut app.state.view {
            View::Roster(roster) => draw_roster(f, layout.main, roster, bucket),
            View::PlayerGames(games) => draw_player_games(f, layout.main, games, bucket),
            View::GameDetail(detail) => draw_game_detail(f, layout.main, detail),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        if app.state.show_help {
            draw_help(f, f.area());
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], state: &AppState) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let mut crumbs = vec![Span::styled("Players", Style::default().add_modifier(Modifier::BOLD))];
    match &state.route {
        Route::Roster => {}
        Route::Player { slug } => {
            let name = match &state.view {
                View::PlayerGames(games) => games
                    .games
                    .ready()
                    .map(|g| g.player.name.clone())
                    .unwrap_or_else(|| display_slug(slug)),
                _ => display_slug(slug),
            };
            crumbs.push(Span::raw(" › "));
            crumbs.push(Span::raw(name));
        }
        Route::Game { player_slug, game_slug } => {
            crumbs.push(Span::raw(" › "));
            crumbs.push(Span::raw(display_slug(player_slug)));
            crumbs.push(Span::raw(" › "));
            crumbs.push(Span::raw(matchup_title(game_slug)));
        }
    }
    if let Some(status) = state.status.as_deref() {
        crumbs.push(Span::styled(format!("   {status}"), Style::default().fg(Color::Yellow)));
    }

    let breadcrumb = Paragraph::new(Line::from(crumbs))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(breadcrumb, header[0]);

    let right = match state.loaded_at.as_deref() {
        Some(at) => format!("{at}  Help: ? "),
        None => "Help: ? ".to_string(),
    };
    let help = Paragraph::new(right)
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, header[1]);
}

/// Render the loading or failure message for a view that has no data yet.
/// Returns the loaded value when there is one.
fn draw_load_state<'a, T>(f: &mut Frame, area: Rect, state: &'a LoadState<T>, noun: &str) -> Option<&'a T> {
    let (msg, color) = match state {
        LoadState::Ready(value) => return Some(value),
        LoadState::Loading => (format!("Loading {noun}..."), Color::DarkGray),
        LoadState::Failed(err) => (
            format!("Could not load {noun}:\n{err}\n\nPress r to retry, Esc to go back"),
            Color::Red,
        ),
    };
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
    None
}

fn draw_roster(f: &mut Frame, area: Rect, roster: &mut RosterState, bucket: &Bucket) {
    let block = default_border(Color::White).title(" Players ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: ←↓↑→/hjkl=move  Enter=view player games  r=reload  ?=help  q=quit")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    roster.cursor.columns = columns_for(content.width);
    let selected = roster.cursor.selected;
    let Some(players) = draw_load_state(f, content, &roster.players, "players") else {
        return;
    };
    if players.is_empty() {
        draw_placeholder(f, content, "No players found");
        return;
    }

    let cards = players
        .iter()
        .map(|player| {
            let accent = accent_color(player.team_color.as_deref());
            Card {
                title: Line::from(format!(" {} ", player.name)),
                lines: vec![
                    Line::from(Span::styled(player.team.clone(), Style::default().fg(accent))),
                    Line::from(Span::styled(
                        bucket.player_photo(&player.slug),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                    Line::from(Span::styled("View player games ›", Style::default().fg(Color::Gray))),
                ],
                accent,
            }
        })
        .collect();

    f.render_widget(
        CardGrid { cards, selected, card_height: ROSTER_CARD_HEIGHT },
        content,
    );
}

fn draw_player_games(f: &mut Frame, area: Rect, games: &mut PlayerGamesState, bucket: &Bucket) {
    let title = match games.games.ready() {
        Some(loaded) => format!(" {} · {} ", loaded.player.name, loaded.player.team),
        None => format!(" {} ", display_slug(&games.slug)),
    };
    let block = default_border(Color::White).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [key_legend, content] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new("Keys: ←↓↑→/hjkl=move  Enter=view game  Esc=players  r=reload  ?=help")
            .style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    games.cursor.columns = columns_for(content.width);
    let selected = games.cursor.selected;
    let Some(loaded) = draw_load_state(f, content, &games.games, "games") else {
        return;
    };
    if loaded.cards.is_empty() {
        draw_placeholder(f, content, "No games for this player");
        return;
    }

    let accent = accent_color(loaded.player.team_color.as_deref());
    let cards = loaded
        .cards
        .iter()
        .map(|card| game_card(card, &bucket.game(&games.slug, &card.game.slug), accent))
        .collect();

    f.render_widget(
        CardGrid { cards, selected, card_height: GAME_CARD_HEIGHT },
        content,
    );
}

fn game_card<'a>(card: &GameCard, assets: &GameAssets, accent: Color) -> Card<'a> {
    let (away, home) = card.game.teams();
    let logos = card.logos.clone().unwrap_or_default();
    let away_logo = logos.away.unwrap_or_else(|| assets.team_logo(away));
    let home_logo = logos.home.unwrap_or_else(|| assets.team_logo(home));
    let score = |side: Option<u16>| side.map(|s| s.to_string()).unwrap_or_else(|| CARD_PLACEHOLDER.into());

    // a failed summary still gets the full line, every value as a placeholder
    let no_totals = Totals::default();
    let stat_line = compact_stat_line(card.totals.as_ref().unwrap_or(&no_totals), CARD_PLACEHOLDER);
    let dim = Style::default().fg(Color::DarkGray);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    Card {
        title: Line::from(format!(" {} ", card.game.name)),
        lines: vec![
            Line::from(vec![
                Span::styled(format!("{away} "), bold),
                Span::raw(score(card.score.map(|s| s.away))),
            ]),
            Line::from(Span::styled(away_logo, dim)),
            Line::from(vec![
                Span::styled(format!("{home} "), bold),
                Span::raw(score(card.score.map(|s| s.home))),
            ]),
            Line::from(Span::styled(home_logo, dim)),
            Line::from(stat_line),
            Line::from(Span::styled("View game ›", Style::default().fg(Color::Gray))),
        ],
        accent,
    }
}

fn draw_game_detail(f: &mut Frame, area: Rect, detail: &GameDetailState) {
    let title = detail
        .film
        .ready()
        .and_then(|film| film.summary.player.clone())
        .unwrap_or_else(|| display_slug(&detail.player_slug));
    let block = default_border(Color::White).title(format!(" {title} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(film) = draw_load_state(f, inner, &detail.film, "game film") else {
        return;
    };

    let [header, stint_strip, primary, stat_strip, secondary, key_legend] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    // Header: matchup, score, logos and the player's stat line
    let subtitle = matchup_title(&detail.game_slug);
    let (away, home) = split_matchup(&subtitle);
    let away_logo = film
        .summary
        .logos
        .away
        .clone()
        .unwrap_or_else(|| detail.assets.team_logo(away));
    let home_logo = film
        .summary
        .logos
        .home
        .clone()
        .unwrap_or_else(|| detail.assets.team_logo(home));
    let dim = Style::default().fg(Color::DarkGray);
    let header_lines = vec![
        Line::from(Span::styled(subtitle.clone(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::raw(format!("{away} ")),
            Span::styled(
                format!("{} - {}", film.score.away, film.score.home),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {home}")),
        ]),
        Line::from(Span::styled(format!("{away}: {away_logo}"), dim)),
        Line::from(Span::styled(format!("{home}: {home_logo}"), dim)),
        Line::from(compact_stat_line(&film.summary.totals, "")),
    ];
    f.render_widget(Paragraph::new(header_lines), header);

    // Stint strip + primary player
    let stints = detail.stints();
    f.render_widget(
        ButtonStrip {
            labels: stints
                .iter()
                .map(|s| format!("{} | {} – {}", s.half, s.start, s.end))
                .collect(),
            active: stints.iter().position(|s| s.id == detail.active_stint),
            cursor: detail.stint_cursor,
            focused: detail.focus == Strip::Stints,
            accent: Color::Yellow,
        },
        stint_strip,
    );
    draw_video_player(
        f,
        primary,
        &format!("Stint {}", detail.active_stint),
        &detail.primary,
        detail.focus == Strip::Stints,
    );

    // Stat strip + secondary player
    let stats = detail.display_stats();
    f.render_widget(
        ButtonStrip {
            labels: stats.iter().map(|c| stat_label(c)).collect(),
            active: detail
                .active_stat
                .as_deref()
                .and_then(|active| stats.iter().position(|c| *c == active)),
            cursor: detail.stat_cursor,
            focused: detail.focus == Strip::Stats,
            accent: Color::Cyan,
        },
        stat_strip,
    );
    let stat_title = detail
        .active_stat
        .as_deref()
        .map(stat_label)
        .unwrap_or_else(|| "No stat clips".to_string());
    draw_video_player(f, secondary, &stat_title, &detail.secondary, detail.focus == Strip::Stats);

    f.render_widget(
        Paragraph::new("Keys: Tab=switch strip  h/l=move  Enter=select  space=play/pause  ←/→=seek 10s  o=open  Esc=back")
            .style(dim),
        key_legend,
    );
}

fn draw_video_player(f: &mut Frame, area: Rect, title: &str, player: &VideoPlayer, focused: bool) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let block = default_border(border).title(format!(" {title} "));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(src) = player.src() else {
        draw_placeholder(f, inner, "No clip");
        return;
    };
    let (glyph, label, color) = match player.status() {
        PlaybackStatus::Playing => ("▶", "Playing", Color::Green),
        PlaybackStatus::Paused => ("⏸", "Paused", Color::Gray),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(format!("{glyph} {label} "), Style::default().fg(color)),
            Span::raw(player.timestamp()),
        ]),
        Line::from(Span::styled(src.to_string(), Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = tui_logger::TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let width = area.width.min(60);
    let height = area.height.min(18);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    let lines = [
        ("←↓↑→ / hjkl", "move between cards"),
        ("Enter", "open card / select clip"),
        ("Esc / b", "back"),
        ("r", "reload"),
        ("Tab", "switch stint / stat strip"),
        ("space / p", "play / pause"),
        ("← / →", "seek playing clips 10s"),
        ("o", "open clip in HOOP_VIDEO_PLAYER"),
        ("f", "toggle full screen"),
        ("\"", "toggle logs"),
        ("?", "close help"),
        ("q", "quit"),
    ]
    .into_iter()
    .map(|(key, what)| {
        Line::from(vec![
            Span::styled(format!("{key:>14}  "), Style::default().fg(Color::Yellow)),
            Span::raw(what),
        ])
    })
    .collect::<Vec<_>>();

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::White).title(" Help ")),
        popup,
    );
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

/// `Cooper_Flagg` -> `Cooper Flagg`
fn display_slug(slug: &str) -> String {
    slug.replace('_', " ")
}

/// `Duke@UNC` -> `Duke @ UNC`
fn matchup_title(game_slug: &str) -> String {
    game_slug.replace('@', " @ ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoop_api::{Game, Logos, Score};

    #[test]
    fn titles_from_slugs() {
        assert_eq!(display_slug("Cooper_Flagg"), "Cooper Flagg");
        assert_eq!(matchup_title("Duke@UNC"), "Duke @ UNC");
    }

    #[test]
    fn game_card_falls_back_to_cleaned_logo_and_placeholders() {
        let card = GameCard {
            game: Game { name: "St. John's @ Villanova".into(), slug: "sj_nova".into() },
            logos: Some(Logos { home: Some("https://cdn/nova.png".into()), away: None }),
            totals: None,
            score: None,
        };
        let assets = Bucket::default().game("RJ_Luis", "sj_nova");
        let rendered = game_card(&card, &assets, Color::Gray);
        let text: Vec<String> = rendered.lines.iter().map(|l| l.to_string()).collect();

        assert_eq!(text[0], format!("St. John's {CARD_PLACEHOLDER}"));
        assert!(text[1].ends_with("/RJ_Luis/sj_nova/logos/stjohns.png"));
        assert_eq!(text[3], "https://cdn/nova.png");
        assert_eq!(text[4], "PTS: — | REB: — | AST: — | BLK: — | FG: — (—%)");
    }

    #[test]
    fn game_card_shows_score_and_stat_line() {
        let totals: Totals = [("PTS", "20"), ("REB", "10")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let card = GameCard {
            game: Game { name: "Duke @ UNC".into(), slug: "duke_unc".into() },
            logos: None,
            totals: Some(totals),
            score: Some(Score { away: 75, home: 80 }),
        };
        let assets = Bucket::default().game("Cooper_Flagg", "duke_unc");
        let text: Vec<String> = game_card(&card, &assets, Color::Gray)
            .lines
            .iter()
            .map(|l| l.to_string())
            .collect();

        assert_eq!(text[0], "Duke 75");
        assert_eq!(text[2], "UNC 80");
        assert!(text[4].starts_with("PTS: 20 | REB: 10"));
    }
}
