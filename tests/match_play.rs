//! Integration tests for match day: roster, CSV import, coin toss, timer and scoring.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use team_shuffle_web::{
    add_goal, coin_toss, duration_presets, format_clock, import_roster_csv, pause_match,
    refresh_match, remove_goal, reset_match, resume_match, save_teams_for_match,
    set_match_duration, shuffle_into_teams_with_rng, start_match, stop_match, CoinSide,
    MatchOutcome, MatchTimer, Player, Position, Session, SessionError, TimerState,
    DEFAULT_MATCH_DURATION_SECS, MATCH_DURATION_PRESETS,
};

fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 18, 0, 0).unwrap()
}

fn at(secs: i64) -> DateTime<Utc> {
    kickoff() + Duration::seconds(secs)
}

fn roster(n: usize) -> Vec<Player> {
    (0..n)
        .map(|i| Player::new(format!("P{i}"), Position::ALL[i % 4], (i % 5) as u8 + 1))
        .collect()
}

/// Session with ten players shuffled into two 5-a-side teams.
fn shuffled_session() -> Session {
    let mut session = Session::with_players(roster(10), 5).unwrap();
    let formation =
        shuffle_into_teams_with_rng(&session.players, 5, &mut StdRng::seed_from_u64(3)).unwrap();
    session.formation = Some(formation);
    session
}

/// Shuffled session with a saved match, kicked off at `kickoff()`.
fn live_session() -> Session {
    let mut session = shuffled_session();
    save_teams_for_match(&mut session, kickoff()).unwrap();
    start_match(&mut session, kickoff()).unwrap();
    session
}

#[test]
fn add_player_validates_name_and_skill() {
    let mut session = Session::new();
    assert_eq!(session.team_size, 5);

    let id = session.add_player("  Ana  ", Position::Forward, 4).unwrap();
    assert_eq!(session.players.len(), 1);
    assert_eq!(session.players[0].id, id);
    assert_eq!(session.players[0].name, "Ana");
    assert_eq!(session.players[0].stats.goals, 0);

    assert_eq!(
        session.add_player("   ", Position::Forward, 3),
        Err(SessionError::EmptyName)
    );
    assert_eq!(
        session.add_player("Bo", Position::Forward, 0),
        Err(SessionError::InvalidSkillLevel(0))
    );
    assert_eq!(
        session.add_player("Bo", Position::Forward, 6),
        Err(SessionError::InvalidSkillLevel(6))
    );
    assert_eq!(session.players.len(), 1);
}

#[test]
fn remove_player_and_team_size() {
    let mut session = Session::with_players(roster(3), 7).unwrap();
    let id = session.players[1].id;
    session.remove_player(id).unwrap();
    assert_eq!(session.players.len(), 2);
    assert_eq!(session.remove_player(id), Err(SessionError::PlayerNotFound(id)));

    assert_eq!(session.set_team_size(6), Err(SessionError::UnsupportedTeamSize(6)));
    session.set_team_size(11).unwrap();
    assert_eq!(session.team_size, 11);
    assert!(Session::with_players(Vec::new(), 3).is_err());
}

#[test]
fn roster_changes_discard_the_last_shuffle_but_keep_the_match() {
    let mut session = shuffled_session();
    coin_toss(&mut session, &mut StepRng::new(0, 0)).unwrap();
    save_teams_for_match(&mut session, kickoff()).unwrap();

    session.add_player("Late", Position::Midfielder, 3).unwrap();
    assert!(session.formation.is_none());
    assert!(session.starting_team.is_none());
    assert!(session.current_match.is_some());
}

#[test]
fn csv_import_reads_players() {
    let csv = "name,position,skill_level\nAna,gk,4\n Bo , FWD , 2\nCy,Mid,5\n";
    let players = import_roster_csv(csv.as_bytes()).unwrap();
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].position, Position::Goalkeeper);
    assert_eq!(players[1].name, "Bo");
    assert_eq!(players[1].position, Position::Forward);
    assert_eq!(players[2].skill_level, 5);

    let mut session = Session::new();
    session.extend_players(players);
    assert_eq!(session.players.len(), 3);
}

#[test]
fn csv_import_reports_bad_rows() {
    let bad_position = "name,position,skill_level\nAna,GK,4\nBo,STRIKER,2\n";
    match import_roster_csv(bad_position.as_bytes()) {
        Err(SessionError::Import { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("STRIKER"));
        }
        other => panic!("expected import error, got {other:?}"),
    }

    let bad_skill = "name,position,skill_level\nAna,GK,9\n";
    assert!(matches!(
        import_roster_csv(bad_skill.as_bytes()),
        Err(SessionError::Import { row: 1, .. })
    ));

    let not_a_number = "name,position,skill_level\nAna,GK,high\n";
    assert!(matches!(
        import_roster_csv(not_a_number.as_bytes()),
        Err(SessionError::Import { row: 1, .. })
    ));
}

#[test]
fn coin_toss_needs_teams() {
    let mut session = Session::with_players(roster(10), 5).unwrap();
    assert_eq!(
        coin_toss(&mut session, &mut StepRng::new(0, 0)),
        Err(SessionError::NoTeams)
    );
}

#[test]
fn coin_toss_heads_first_team_tails_second() {
    let mut session = shuffled_session();

    let toss = coin_toss(&mut session, &mut StepRng::new(0, 0)).unwrap();
    assert_eq!(toss.side, CoinSide::Heads);
    assert_eq!(toss.starting_team, 0);
    assert_eq!(toss.team_name, "Team Alpha");
    assert_eq!(session.starting_team, Some(0));

    let toss = coin_toss(&mut session, &mut StepRng::new(u64::MAX, 0)).unwrap();
    assert_eq!(toss.side, CoinSide::Tails);
    assert_eq!(toss.team_name, "Team Beta");
    assert_eq!(session.starting_team, Some(1));
}

#[test]
fn save_teams_snapshots_formation() {
    let mut session = Session::new();
    assert_eq!(
        save_teams_for_match(&mut session, kickoff()),
        Err(SessionError::NoTeams)
    );

    let mut session = shuffled_session();
    coin_toss(&mut session, &mut StepRng::new(u64::MAX, 0)).unwrap();
    let id = save_teams_for_match(&mut session, kickoff()).unwrap();

    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.id, id);
    assert_eq!(game.team_size, 5);
    assert_eq!(game.starting_team, Some(1));
    assert_eq!(game.created_at, kickoff());
    assert_eq!(game.teams, session.formation.as_ref().unwrap().teams);
    assert_eq!(game.scores.len(), 2);
    assert_eq!(game.scores[0].team_name, "Team Alpha");
    assert_eq!(game.scores[1].goals, 0);
    assert_eq!(game.timer.state, TimerState::Ready);
    assert_eq!(game.timer.duration_secs, DEFAULT_MATCH_DURATION_SECS);
}

#[test]
fn timer_counts_down_with_pauses() {
    let mut timer = MatchTimer::new(600);
    assert_eq!(timer.time_left_secs(at(100)), 600);

    timer.start(kickoff()).unwrap();
    assert_eq!(timer.elapsed_secs(at(90)), 90);
    assert_eq!(timer.time_left_secs(at(90)), 510);

    timer.pause(at(90)).unwrap();
    assert_eq!(timer.state, TimerState::Paused);
    assert_eq!(timer.elapsed_secs(at(200)), 90);

    timer.resume(at(200)).unwrap();
    assert_eq!(timer.elapsed_secs(at(260)), 150);

    assert_eq!(timer.pause(at(260)), Ok(()));
    assert_eq!(timer.pause(at(261)), Err(SessionError::InvalidTimerState));
}

#[test]
fn timer_reaches_full_time_once() {
    let mut timer = MatchTimer::new(300);
    timer.start(kickoff()).unwrap();
    assert!(!timer.refresh(at(299)));
    assert!(timer.refresh(at(301)));
    assert_eq!(timer.state, TimerState::FullTime);
    assert_eq!(timer.time_left_secs(at(400)), 0);
    assert!(!timer.refresh(at(500)));

    timer.reset();
    assert_eq!(timer.state, TimerState::Ready);
    assert_eq!(timer.time_left_secs(at(600)), 300);
}

#[test]
fn timer_rejects_illegal_transitions() {
    let mut timer = MatchTimer::default();
    assert_eq!(timer.pause(kickoff()), Err(SessionError::InvalidTimerState));
    assert_eq!(timer.resume(kickoff()), Err(SessionError::InvalidTimerState));
    assert_eq!(timer.stop(kickoff()), Err(SessionError::InvalidTimerState));
    assert_eq!(timer.set_duration(0), Err(SessionError::InvalidDuration));
    timer.set_duration(7 * 60).unwrap();

    timer.start(kickoff()).unwrap();
    assert_eq!(timer.start(at(1)), Err(SessionError::InvalidTimerState));
    assert_eq!(timer.set_duration(60), Err(SessionError::InvalidTimerState));

    timer.stop(at(30)).unwrap();
    assert!(timer.is_full_time());
    assert_eq!(timer.elapsed_secs(at(100)), 30);
}

#[test]
fn duration_presets_are_labelled_and_accepted() {
    let presets = duration_presets();
    let labels: Vec<&str> = presets.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["5 Minutes", "7 Minutes", "10 Minutes", "90 Minutes"]);
    assert!(MATCH_DURATION_PRESETS.contains(&DEFAULT_MATCH_DURATION_SECS));

    for preset in presets {
        let mut timer = MatchTimer::default();
        timer.set_duration(preset.duration_secs).unwrap();
        assert_eq!(timer.time_left_secs(kickoff()), preset.duration_secs);
    }
}

#[test]
fn clock_format_is_zero_padded() {
    assert_eq!(format_clock(0), "00:00");
    assert_eq!(format_clock(65), "01:05");
    assert_eq!(format_clock(600), "10:00");
    assert_eq!(format_clock(90 * 60), "90:00");
}

#[test]
fn goals_record_scorer_and_match_clock() {
    let mut session = live_session();
    add_goal(&mut session, 0, Some("Ana"), at(65)).unwrap();
    add_goal(&mut session, 0, None, at(120)).unwrap();
    add_goal(&mut session, 1, Some("   "), at(300)).unwrap();

    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.scores[0].goals, 2);
    assert_eq!(game.scores[0].scorers[0].player, "Ana");
    assert_eq!(game.scores[0].scorers[0].time, "01:05");
    assert_eq!(game.scores[0].scorers[1].player, "Unknown");
    assert_eq!(game.scores[1].scorers[0].time, "05:00");
    assert_eq!(
        game.outcome(),
        Some(MatchOutcome::Win {
            team: "Team Alpha".to_string(),
            goals_for: 2,
            goals_against: 1,
        })
    );

    assert_eq!(
        add_goal(&mut session, 5, None, at(310)),
        Err(SessionError::TeamNotFound(5))
    );
}

#[test]
fn removing_goals_drops_last_scorer_and_stops_at_zero() {
    let mut session = live_session();
    add_goal(&mut session, 1, Some("Bo"), at(10)).unwrap();
    add_goal(&mut session, 1, Some("Cy"), at(20)).unwrap();

    remove_goal(&mut session, 1).unwrap();
    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.scores[1].goals, 1);
    assert_eq!(game.scores[1].scorers[0].player, "Bo");

    remove_goal(&mut session, 0).unwrap();
    remove_goal(&mut session, 1).unwrap();
    remove_goal(&mut session, 1).unwrap();
    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.scores[0].goals, 0);
    assert_eq!(game.scores[1].goals, 0);
    assert_eq!(game.outcome(), Some(MatchOutcome::Draw { goals: 0 }));
}

#[test]
fn goals_only_between_kickoff_and_full_time() {
    let mut session = shuffled_session();
    assert_eq!(
        add_goal(&mut session, 0, None, kickoff()),
        Err(SessionError::NoMatch)
    );
    save_teams_for_match(&mut session, kickoff()).unwrap();
    assert_eq!(
        add_goal(&mut session, 0, None, kickoff()),
        Err(SessionError::InvalidTimerState)
    );

    start_match(&mut session, kickoff()).unwrap();
    // Default ten minutes: a goal at 10:01 comes after the whistle.
    assert_eq!(
        add_goal(&mut session, 0, None, at(601)),
        Err(SessionError::InvalidTimerState)
    );
    assert_eq!(
        session.current_match.as_ref().unwrap().timer.state,
        TimerState::FullTime
    );
}

#[test]
fn match_controls_drive_the_timer() {
    let mut session = shuffled_session();
    save_teams_for_match(&mut session, kickoff()).unwrap();
    set_match_duration(&mut session, 5 * 60).unwrap();

    start_match(&mut session, kickoff()).unwrap();
    pause_match(&mut session, at(60)).unwrap();
    resume_match(&mut session, at(120)).unwrap();
    assert!(!refresh_match(&mut session, at(300)).unwrap());
    assert!(refresh_match(&mut session, at(360)).unwrap());
    assert_eq!(
        stop_match(&mut session, at(361)),
        Err(SessionError::InvalidTimerState)
    );
}

#[test]
fn stop_then_restart_clears_scores() {
    let mut session = live_session();
    add_goal(&mut session, 0, Some("Ana"), at(30)).unwrap();
    stop_match(&mut session, at(45)).unwrap();

    let game = session.current_match.as_ref().unwrap();
    assert!(game.timer.is_full_time());
    assert_eq!(game.timer.elapsed_secs(at(1000)), 45);

    start_match(&mut session, at(2000)).unwrap();
    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.timer.state, TimerState::Running);
    assert!(game.scores.iter().all(|s| s.goals == 0 && s.scorers.is_empty()));
}

#[test]
fn reset_zeroes_scores_and_timer() {
    let mut session = live_session();
    add_goal(&mut session, 1, Some("Bo"), at(30)).unwrap();
    reset_match(&mut session).unwrap();

    let game = session.current_match.as_ref().unwrap();
    assert_eq!(game.timer.state, TimerState::Ready);
    assert_eq!(game.timer.time_left_secs(at(500)), DEFAULT_MATCH_DURATION_SECS);
    assert!(game.scores.iter().all(|s| s.goals == 0));

    let mut empty = Session::new();
    assert_eq!(reset_match(&mut empty), Err(SessionError::NoMatch));
}
