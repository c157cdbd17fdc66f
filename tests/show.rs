//! Headless runs of the terminal show: no raw mode, output goes to a buffer.

use crossterm::event::{Event, KeyCode, KeyEvent};
use fireworks::config::ShowConfig;
use fireworks::show::FireworkShow;

const DT: f64 = 1.0 / 60.0;

fn seeded(once: bool) -> ShowConfig {
    let mut config = ShowConfig::from_toml(
        r#"
        seed = 12

        [firework]
        flight_duration = 0.5

        [[firework.charges]]
        pattern = "normal"
        effect = "trail"
        color = "Cyan"
        "#,
    )
    .unwrap();
    config.once = once;
    config
}

#[test]
fn once_mode_finishes_after_burnout() {
    let mut show = FireworkShow::new(&seeded(true), 80, 48).unwrap();
    let mut frames = 0;
    while !show.is_finished() && frames < 60 * 10 {
        show.update(DT);
        frames += 1;
    }
    assert!(show.is_finished());
    assert_eq!(show.launches(), 1);

    // further updates are ignored once finished
    show.update(DT);
    assert!(show.firework().is_spent());
}

#[test]
fn relaunches_when_spent() {
    let mut show = FireworkShow::new(&seeded(false), 80, 48).unwrap();
    for _ in 0..60 * 6 {
        show.update(DT);
    }
    assert!(show.launches() >= 2);
    assert!(!show.is_finished());
}

#[test]
fn space_launches_a_fresh_rocket() {
    let mut show = FireworkShow::new(&seeded(false), 80, 48).unwrap();
    for _ in 0..45 {
        show.update(DT);
    }
    assert!(show.firework().has_exploded());

    show.handle_event(&Event::Key(KeyEvent::from(KeyCode::Char(' '))));
    assert!(!show.firework().has_exploded());
    assert_eq!(show.launches(), 2);
}

#[test]
fn renders_full_frames_through_the_burst() {
    let mut show = FireworkShow::new(&seeded(false), 40, 20).unwrap();
    let mut lit_frames = 0;
    for _ in 0..90 {
        show.update(DT);
        let mut out = Vec::new();
        show.render(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches('▄').count(), 40 * 10);
        // any colour other than the black sky means something was drawn
        if text.matches("48;2;0;0;0m").count() < text.matches("48;2;").count() {
            lit_frames += 1;
        }
    }
    assert!(lit_frames > 0);

    show.resize(20, 10);
    let mut out = Vec::new();
    show.render(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().matches('▄').count(), 20 * 5);
}

#[test]
fn sample_config_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/show.toml");
    let config = ShowConfig::load(path).unwrap();
    let plan = config.firework.plan().unwrap();
    assert_eq!(plan.charges.len(), 4);
    assert!(FireworkShow::new(&config, 80, 48).is_ok());
}

#[test]
fn rendering_does_not_disturb_seeded_replay() {
    let config = ShowConfig::from_toml(
        r#"
        seed = 42

        [firework]
        flight_duration = 0.3

        [[firework.charges]]
        pattern = "star"
        effect = "trail_twinkle"
        color = "Yellow"
        "#,
    )
    .unwrap();

    let mut quiet = FireworkShow::new(&config, 40, 20).unwrap();
    let mut busy = FireworkShow::new(&config, 40, 20).unwrap();
    let mut sink = Vec::new();

    for step in 0..200 {
        quiet.update(DT);
        busy.update(DT);

        quiet.render(&mut sink).unwrap();
        busy.render(&mut sink).unwrap();
        // the terminal loop redraws between updates at an uneven rate
        if step % 3 == 0 {
            busy.render(&mut sink).unwrap();
        }
        sink.clear();
    }

    assert!(quiet.launches() >= 2);
    assert_eq!(quiet.launches(), busy.launches());
    assert_eq!(quiet.firework().particles(), busy.firework().particles());
}

#[test]
fn far_off_origin_renders_without_panicking() {
    let config = ShowConfig::from_toml(
        r#"
        [firework]
        x = 1e12
        y = 1e12

        [[firework.charges]]
        pattern = "normal"
        color = "red"
        "#,
    )
    .unwrap();

    let mut show = FireworkShow::new(&config, 40, 20).unwrap();
    show.update(DT);
    let mut out = Vec::new();
    show.render(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap().matches('▄').count(), 40 * 10);
}
