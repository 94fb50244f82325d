//! Database description embedded in every SQL-writing prompt.

/// Tables, columns, usage rules, and player-name conventions of the cricket
/// database, written for a model that has to produce `DuckDB` SQL against it.
pub const SCHEMA_DESCRIPTION: &str = r#"
Database: DuckDB with cricket data (5M+ deliveries, 11,535 matches)

=== TABLE balls: one row per delivery (complete, exact) ===
Use for career stats, aggregates, strike rates, averages, head-to-head records.

  match_id (VARCHAR)         match identifier
  innings (INTEGER)          innings number (1 or 2)
  over (INTEGER)             over number
  ball (INTEGER)             ball number within the over
  batter (VARCHAR)           batter on strike
  non_striker (VARCHAR)      batter at the other end
  bowler (VARCHAR)           bowler
  batting_team (VARCHAR)
  bowling_team (VARCHAR)
  runs_off_bat (INTEGER)     runs scored off the bat
  extras (INTEGER)           extra runs
  total_runs (INTEGER)       all runs from this delivery
  extra_type (VARCHAR)       wide, noball, ...
  wicket_type (VARCHAR)      dismissal kind when a wicket fell, else NULL
  dismissed_batter (VARCHAR)
  phase (VARCHAR)            match phase
  cumulative_runs (INTEGER)  running team total
  wickets_fallen (INTEGER)   wickets down so far

=== TABLE matches: one row per match (complete, exact) ===
Use for results, venues, toss impact, team records.

  match_id (VARCHAR)
  date (DATE)
  venue (VARCHAR), city (VARCHAR), country (VARCHAR)
  format (VARCHAR)           ODI, T20, Test, ...
  gender (VARCHAR)           male / female
  team1 (VARCHAR), team2 (VARCHAR)
  winner (VARCHAR)
  toss_winner (VARCHAR)
  toss_decision (VARCHAR)    bat / field
  player_of_match (VARCHAR)

=== TABLE commentary: features extracted from text commentary (PARTIAL, IPL 2017-2025 only) ===
Coverage is partial (about 48% of deliveries for length, about 10% for delivery
types). Use it ONLY for delivery-level questions the balls table cannot answer.
89,993 rows are linked to matches.

  commentary_id (TEXT)
  cricsheet_match_id (TEXT)  joins to balls.match_id / matches.match_id
  match_id (TEXT)            ESPN id, never use for joins
  innings (INT), over (INT), ball (INT)
  text (TEXT)                raw commentary
  Boolean flags:
    length_short, length_full, length_good,
    line_off, line_middle, line_leg,
    mention_yorker, mention_bouncer, mention_swing, mention_spin,
    mention_beaten, mention_edge, mention_mistimed
  sentiment_score (FLOAT)    -1 to +1

Commentary rules:
1. Use commentary for delivery-specific questions ("wicket rate when yorkers are
   bowled", "do off-stump deliveries find more edges").
2. Never use commentary for aggregate statistics (career strike rates, most
   wickets, head-to-head). Use balls and matches.
3. Always join on cricsheet_match_id plus innings, over and ball:
     FROM commentary c
     JOIN balls b ON c.cricsheet_match_id = b.match_id
                 AND c.innings = b.innings AND c.over = b.over AND c.ball = b.ball
4. Caveat commentary-based findings with the sample size
   ("based on 5,744 deliveries where a yorker was mentioned").
5. Commentary covers the IPL only. Do not use it for ODIs, Tests or other leagues.

Example (balls only):
  SELECT batter, SUM(runs_off_bat) AS runs, COUNT(*) AS balls,
         ROUND(SUM(runs_off_bat) * 100.0 / COUNT(*), 2) AS strike_rate
  FROM balls GROUP BY batter ORDER BY runs DESC

Example (commentary):
  SELECT b.bowler, COUNT(*) AS yorkers_bowled,
         SUM(CASE WHEN b.wicket_type IS NOT NULL THEN 1 ELSE 0 END) AS wickets
  FROM commentary c
  JOIN balls b ON c.cricsheet_match_id = b.match_id
              AND c.innings = b.innings AND c.over = b.over AND c.ball = b.ball
  WHERE c.mention_yorker = TRUE
  GROUP BY b.bowler HAVING COUNT(*) >= 20 ORDER BY wickets DESC

Derived metrics:
  strike rate     = runs / balls * 100
  batting average = runs / dismissals
  economy rate    = runs conceded / overs

Player names use abbreviated Cricsheet form, not full names:
  "V Kohli", "RG Sharma", "MS Dhoni", "JJ Bumrah", "YS Chahal", "AB de Villiers",
  "SPD Smith", "JE Root", "BA Stokes". Some are stored in full ("Kuldeep Yadav").
When a question uses a full name, match with LIKE ('%Chahal%') or use the
abbreviated form.

Write DuckDB SQL. ROW_NUMBER(), SUM(), AVG(), COUNT() and CASE WHEN are available.
"#;
