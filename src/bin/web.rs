//! Single binary web server: JSON API for rosters, team shuffles and live matches.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), RUST_LOG (e.g. debug).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use team_shuffle_web::{
    add_goal, coin_toss, duration_presets, format_clock, get_team_stats, import_roster_csv,
    pause_match, refresh_match, remove_goal, reset_match, resume_match, save_teams_for_match,
    set_match_duration, shuffle_into_teams, start_match, stop_match, validate_team_formation,
    FormationResult, GameMatch, MatchOutcome, PlayerId, Position, Session, SessionError,
    SessionId, TeamStats, ValidationWarning,
};

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// How often the cleanup task runs.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateSessionBody {
    team_size: Option<usize>,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default = "default_position")]
    position: Position,
    #[serde(default = "default_skill_level")]
    skill_level: u8,
}

fn default_position() -> Position {
    Position::Midfielder
}

fn default_skill_level() -> u8 {
    3
}

#[derive(Deserialize)]
struct TeamSizeBody {
    team_size: usize,
}

#[derive(Deserialize)]
struct DurationBody {
    duration_secs: u32,
}

#[derive(Deserialize, Default)]
struct GoalBody {
    scorer: Option<String>,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id.
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

/// Path segments: session id and timer action (start, pause, resume, stop, reset).
#[derive(Deserialize)]
struct MatchActionPath {
    id: SessionId,
    action: String,
}

/// Path segments: session id and team index in the saved match.
#[derive(Deserialize)]
struct MatchTeamPath {
    id: SessionId,
    team: usize,
}

#[derive(Serialize)]
struct ShuffleResponse<'a> {
    formation: &'a FormationResult,
    warnings: Vec<ValidationWarning>,
    message: String,
}

#[derive(Serialize)]
struct TeamStatsEntry {
    name: String,
    color: String,
    stats: TeamStats,
}

#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    game: &'a GameMatch,
    time_left_secs: u32,
    clock: String,
    outcome: Option<MatchOutcome>,
}

fn error_response(e: &SessionError) -> HttpResponse {
    log::warn!("Rejected: {}", e);
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

/// Lock state, find the session, refresh its activity time and hand it to `f`.
fn with_session<F>(state: &AppState, id: SessionId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.session)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

/// Run a session operation and answer with the whole session on success.
fn respond_with_session<F>(state: &AppState, id: SessionId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> Result<(), SessionError>,
{
    with_session(state, id, |session| match op(session) {
        Ok(()) => HttpResponse::Ok().json(&*session),
        Err(e) => error_response(&e),
    })
}

fn match_view(session: &mut Session) -> HttpResponse {
    let now = Utc::now();
    match refresh_match(session, now) {
        Ok(true) => log_full_time(session),
        Ok(false) => {}
        Err(e) => return error_response(&e),
    }
    let Some(game) = session.current_match.as_ref() else {
        return error_response(&SessionError::NoMatch);
    };
    let time_left_secs = game.timer.time_left_secs(now);
    HttpResponse::Ok().json(MatchView {
        game,
        time_left_secs,
        clock: format_clock(time_left_secs),
        outcome: game.outcome(),
    })
}

fn log_full_time(session: &Session) {
    let Some(game) = session.current_match.as_ref() else {
        return;
    };
    match game.outcome() {
        Some(MatchOutcome::Win {
            team,
            goals_for,
            goals_against,
        }) => log::info!(
            "Full time in session {}: {} wins {}-{}",
            session.id,
            team,
            goals_for,
            goals_against
        ),
        Some(MatchOutcome::Draw { goals }) => {
            log::info!("Full time in session {}: draw {}-{}", session.id, goals, goals)
        }
        None => log::info!("Full time in session {}", session.id),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "team-shuffle-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Match lengths offered by the duration picker.
#[get("/api/match-durations")]
async fn api_match_durations() -> HttpResponse {
    HttpResponse::Ok().json(duration_presets())
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<CreateSessionBody>>) -> HttpResponse {
    let mut session = Session::new();
    if let Some(team_size) = body.as_ref().and_then(|b| b.team_size) {
        if let Err(e) = session.set_team_size(team_size) {
            return error_response(&e);
        }
    }
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {} ({}v{})", id, session.team_size, session.team_size);
    let response = HttpResponse::Ok().json(&session);
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| HttpResponse::Ok().json(&*session))
}

#[post("/api/sessions/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    respond_with_session(&state, path.id, |session| {
        session
            .add_player(body.name, body.position, body.skill_level)
            .map(|_| ())
    })
}

/// Import players from a CSV body with header `name,position,skill_level`.
#[post("/api/sessions/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<SessionPath>, body: String) -> HttpResponse {
    let players = match import_roster_csv(body.as_bytes()) {
        Ok(players) => players,
        Err(e) => return error_response(&e),
    };
    respond_with_session(&state, path.id, |session| {
        log::info!("Imported {} player(s) into session {}", players.len(), session.id);
        session.extend_players(players);
        Ok(())
    })
}

#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    let player_id = path.player_id;
    respond_with_session(&state, path.id, |session| session.remove_player(player_id))
}

#[put("/api/sessions/{id}/team-size")]
async fn api_set_team_size(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<TeamSizeBody>,
) -> HttpResponse {
    respond_with_session(&state, path.id, |session| session.set_team_size(body.team_size))
}

/// Can the roster fill two teams at the current size? Never fails; see `valid`.
#[get("/api/sessions/{id}/validation")]
async fn api_validate(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        HttpResponse::Ok().json(validate_team_formation(&session.players, session.team_size))
    })
}

/// Validate, then shuffle the roster into teams. Clears any previous coin toss.
#[post("/api/sessions/{id}/shuffle")]
async fn api_shuffle(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        let validation = validate_team_formation(&session.players, session.team_size);
        if !validation.valid {
            log::warn!("Cannot form teams in session {}: {}", session.id, validation.message);
            return HttpResponse::BadRequest().json(serde_json::json!({
                "error": validation.message,
                "suggestion": validation.suggestion,
            }));
        }
        let formation = match shuffle_into_teams(&session.players, session.team_size) {
            Ok(f) => f,
            Err(e) => return error_response(&SessionError::from(e)),
        };
        log::info!(
            "Shuffled {} player(s) into {} team(s) with {} substitute(s) in session {}",
            session.players.len(),
            formation.total_teams,
            formation.substitutes.len(),
            session.id
        );
        session.starting_team = None;
        let formation = session.formation.insert(formation);
        HttpResponse::Ok().json(ShuffleResponse {
            formation,
            warnings: validation.warnings,
            message: validation.message,
        })
    })
}

#[get("/api/sessions/{id}/teams/stats")]
async fn api_team_stats(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        let Some(formation) = session.formation.as_ref() else {
            return error_response(&SessionError::NoTeams);
        };
        let stats: Vec<TeamStatsEntry> = formation
            .teams
            .iter()
            .map(|t| TeamStatsEntry {
                name: t.name.clone(),
                color: t.color.clone(),
                stats: get_team_stats(&t.players),
            })
            .collect();
        HttpResponse::Ok().json(stats)
    })
}

#[post("/api/sessions/{id}/coin-toss")]
async fn api_coin_toss(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        match coin_toss(session, &mut rand::thread_rng()) {
            Ok(toss) => HttpResponse::Ok().json(toss),
            Err(e) => error_response(&e),
        }
    })
}

/// Save the current teams (and coin toss) as the match to play.
#[post("/api/sessions/{id}/match")]
async fn api_save_match(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, |session| {
        match save_teams_for_match(session, Utc::now()) {
            Ok(match_id) => {
                log::info!("Saved match {} in session {}", match_id, session.id);
                match_view(session)
            }
            Err(e) => error_response(&e),
        }
    })
}

#[get("/api/sessions/{id}/match")]
async fn api_get_match(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    with_session(&state, path.id, match_view)
}

#[put("/api/sessions/{id}/match/duration")]
async fn api_set_match_duration(
    state: AppState,
    path: Path<SessionPath>,
    body: Json<DurationBody>,
) -> HttpResponse {
    with_session(&state, path.id, |session| {
        match set_match_duration(session, body.duration_secs) {
            Ok(()) => match_view(session),
            Err(e) => error_response(&e),
        }
    })
}

/// Timer control: start, pause, resume, stop or reset.
#[post("/api/sessions/{id}/match/{action}")]
async fn api_match_action(state: AppState, path: Path<MatchActionPath>) -> HttpResponse {
    let action = path.action.as_str();
    if !matches!(action, "start" | "pause" | "resume" | "stop" | "reset") {
        return HttpResponse::NotFound().json(serde_json::json!({ "error": "Unknown match action" }));
    }
    with_session(&state, path.id, |session| {
        let now = Utc::now();
        if let Ok(true) = refresh_match(session, now) {
            log_full_time(session);
        }
        let result = match action {
            "start" => start_match(session, now),
            "pause" => pause_match(session, now),
            "resume" => resume_match(session, now),
            "stop" => stop_match(session, now),
            _ => reset_match(session),
        };
        match result {
            Ok(()) => {
                if action == "stop" {
                    log_full_time(session);
                }
                match_view(session)
            }
            Err(e) => error_response(&e),
        }
    })
}

#[post("/api/sessions/{id}/match/teams/{team}/goals")]
async fn api_add_goal(
    state: AppState,
    path: Path<MatchTeamPath>,
    body: Option<Json<GoalBody>>,
) -> HttpResponse {
    let scorer = body.map(|b| b.into_inner()).unwrap_or_default().scorer;
    let team = path.team;
    with_session(&state, path.id, |session| {
        match add_goal(session, team, scorer.as_deref(), Utc::now()) {
            Ok(()) => match_view(session),
            Err(e) => error_response(&e),
        }
    })
}

#[delete("/api/sessions/{id}/match/teams/{team}/goals")]
async fn api_remove_goal(state: AppState, path: Path<MatchTeamPath>) -> HttpResponse {
    let team = path.team;
    with_session(&state, path.id, |session| match remove_goal(session, team) {
        Ok(()) => match_view(session),
        Err(e) => error_response(&e),
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(favicon)
            .service(api_match_durations)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_add_player)
            .service(api_import_players)
            .service(api_remove_player)
            .service(api_set_team_size)
            .service(api_validate)
            .service(api_shuffle)
            .service(api_team_stats)
            .service(api_coin_toss)
            .service(api_save_match)
            .service(api_get_match)
            .service(api_set_match_duration)
            .service(api_match_action)
            .service(api_add_goal)
            .service(api_remove_goal)
    })
    .bind(bind)?
    .run()
    .await
}
