use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use kleplace_parser::{parse, Layout};
use kleplace_pcb::{
    place_layout, Board, ComponentId, ComponentRef, Footprint, LayoutResolver, MemoryBoard,
    PcbError, PlacedKey, PlacementConfig, Severity,
};

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn macropad() -> (Vec<PlacedKey>, MemoryBoard) {
    let root = workspace_root();
    let layout =
        std::fs::read_to_string(root.join("fixtures/layouts/macropad.json")).unwrap();
    let keys = parse(&Layout::from_json_str(&layout).unwrap());
    let board = MemoryBoard::from_path(&root.join("fixtures/boards/macropad.json")).unwrap();
    (keys, board)
}

#[test]
fn macropad_places_switches_and_diodes() {
    let (keys, mut board) = macropad();
    let report = place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();

    assert_eq!(report.placed.len(), 9);
    assert!(report.missing_primaries.is_empty());
    assert_eq!(report.missing_secondaries, ["SW9"]);

    // "2" sits at grid (2, 0).
    let sw3 = board.footprint("SW3").unwrap();
    assert_abs_diff_eq!(sw3.x, 2.5 * 19.05, epsilon = 1e-9);
    assert_abs_diff_eq!(sw3.y, 0.5 * 19.05, epsilon = 1e-9);

    let d3 = board.footprint("D3").unwrap();
    assert_abs_diff_eq!(d3.x, 2.95 * 19.05, epsilon = 1e-9);
    assert_abs_diff_eq!(d3.y, 0.255 * 19.05, epsilon = 1e-9);
    assert_abs_diff_eq!(d3.orientation, 90.0);
    assert!(d3.flipped);

    // 1.5u Tab: centred on its width.
    let tab = board.footprint("SW5").unwrap();
    assert_abs_diff_eq!(tab.x, 0.75 * 19.05, epsilon = 1e-9);

    // 2u-tall Enter keeps the half-unit vertical offset.
    let enter = board.footprint("SW8").unwrap();
    assert_abs_diff_eq!(enter.y, 2.75 * 19.05, epsilon = 1e-9);

    assert_eq!(board.refresh_count, 1);
    assert_eq!(board.notifications.len(), 1);
    assert_eq!(board.notifications[0].severity, Severity::Warning);
}

#[test]
fn already_flipped_diode_stays_flipped() {
    let (keys, mut board) = macropad();
    assert!(board.footprint("D2").unwrap().flipped);

    let report = place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();

    assert!(board.footprint("D2").unwrap().flipped);
    let sw2 = report.placed.iter().find(|p| p.reference == "SW2").unwrap();
    assert!(!sw2.secondary.as_ref().unwrap().flipped_now);
    let sw1 = report.placed.iter().find(|p| p.reference == "SW1").unwrap();
    assert!(sw1.secondary.as_ref().unwrap().flipped_now);
}

#[test]
fn non_switch_and_unused_footprints_are_untouched() {
    let (keys, mut board) = macropad();
    let before_r1 = board.footprint("R1").cloned().unwrap();
    let before_sw10 = board.footprint("SW10").cloned().unwrap();

    place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();

    assert_eq!(board.footprint("R1"), Some(&before_r1));
    assert_eq!(board.footprint("SW10"), Some(&before_sw10));
}

#[test]
fn placing_twice_is_stable() {
    let (keys, mut board) = macropad();
    let config = PlacementConfig::default();
    place_layout(&mut board, &keys, &config).unwrap();
    let first = board.footprints.clone();
    place_layout(&mut board, &keys, &config).unwrap();
    assert_eq!(board.footprints, first);
}

#[test]
fn custom_config_is_applied() {
    let (keys, mut board) = macropad();
    let config =
        PlacementConfig::from_path(&workspace_root().join("fixtures/config/wide_pitch.yaml"))
            .unwrap();
    place_layout(&mut board, &keys, &config).unwrap();

    let sw1 = board.footprint("SW1").unwrap();
    assert_abs_diff_eq!(sw1.x, 9.5, epsilon = 1e-9);
    assert_abs_diff_eq!(board.footprint("D1").unwrap().orientation, 270.0);
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SetPosition(String, f64, f64),
    SetOrientation(String, f64),
    Flip(String),
    Notify(String, Severity),
    Refresh,
}

/// Host double that records every mutating call.
struct RecordingBoard {
    components: Vec<ComponentRef>,
    flipped: Vec<bool>,
    calls: Vec<Call>,
}

impl RecordingBoard {
    fn new(refs: &[(&str, &str)]) -> Self {
        let components = refs
            .iter()
            .enumerate()
            .map(|(i, (reference, value))| ComponentRef {
                id: ComponentId(i),
                reference: reference.to_string(),
                value: value.to_string(),
            })
            .collect::<Vec<_>>();
        let flipped = vec![false; components.len()];
        Self {
            components,
            flipped,
            calls: Vec::new(),
        }
    }
}

impl Board for RecordingBoard {
    fn footprints(&self) -> Vec<ComponentRef> {
        self.components.clone()
    }

    fn set_position(&mut self, fp: &ComponentRef, x: f64, y: f64) -> Result<(), PcbError> {
        self.calls
            .push(Call::SetPosition(fp.reference.clone(), x, y));
        Ok(())
    }

    fn set_orientation_degrees(
        &mut self,
        fp: &ComponentRef,
        degrees: f64,
    ) -> Result<(), PcbError> {
        self.calls
            .push(Call::SetOrientation(fp.reference.clone(), degrees));
        Ok(())
    }

    fn flip(&mut self, fp: &ComponentRef) -> Result<(), PcbError> {
        self.flipped[fp.id.0] = !self.flipped[fp.id.0];
        self.calls.push(Call::Flip(fp.reference.clone()));
        Ok(())
    }

    fn is_flipped(&self, fp: &ComponentRef) -> Result<bool, PcbError> {
        Ok(self.flipped[fp.id.0])
    }

    fn notify_user(&mut self, message: &str, severity: Severity) {
        self.calls.push(Call::Notify(message.to_string(), severity));
    }

    fn refresh_view(&mut self) {
        self.calls.push(Call::Refresh);
    }
}

#[test]
fn missing_primary_skips_key_without_mutation() {
    let mut board = RecordingBoard::new(&[("SW1", "A"), ("D1", "")]);
    let keys = vec![PlacedKey::unit("Z", 0.0, 0.0)];
    let report = place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();

    assert_eq!(report.missing_primaries, ["Z"]);
    assert!(report.placed.is_empty());
    assert_eq!(
        board.calls,
        vec![
            Call::Notify("No footprint found for key \"Z\"".to_string(), Severity::Warning),
            Call::Refresh,
        ]
    );
}

#[test]
fn missing_secondary_places_primary_only() {
    let mut board = RecordingBoard::new(&[("SW1", "A"), ("D01", "")]);
    let keys = vec![PlacedKey::unit("a", 0.0, 0.0)];
    let report = place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.placed.len(), 1);
    assert!(report.placed[0].secondary.is_none());
    assert!(matches!(board.calls[0], Call::SetPosition(ref r, _, _) if r == "SW1"));
    assert_eq!(
        board.calls[1],
        Call::Notify("No D footprint found for SW1 (A)".to_string(), Severity::Warning)
    );
    assert_eq!(board.calls[2], Call::Refresh);
    assert_eq!(board.calls.len(), 3);
}

#[test]
fn secondary_is_flipped_then_moved_then_rotated() {
    let mut board = RecordingBoard::new(&[("D1", ""), ("SW1", "A")]);
    let resolver = LayoutResolver::new(PlacementConfig {
        pitch: 10.0,
        ..PlacementConfig::default()
    })
    .unwrap();
    resolver
        .place(&mut board, &[PlacedKey::unit("A", 0.0, 0.0)])
        .unwrap();

    let names: Vec<&str> = board
        .calls
        .iter()
        .map(|c| match c {
            Call::SetPosition(r, ..) => if r == "SW1" { "sw-pos" } else { "d-pos" },
            Call::SetOrientation(..) => "d-rot",
            Call::Flip(..) => "d-flip",
            Call::Notify(..) => "notify",
            Call::Refresh => "refresh",
        })
        .collect();
    assert_eq!(names, ["sw-pos", "d-flip", "d-pos", "d-rot", "refresh"]);

    let Call::SetPosition(_, x, y) = &board.calls[2] else {
        panic!("expected diode position");
    };
    assert_abs_diff_eq!(*x, 5.0 + 4.5, epsilon = 1e-9);
    assert_abs_diff_eq!(*y, 5.0 - 2.45, epsilon = 1e-9);
}

#[test]
fn refresh_happens_once_for_many_keys() {
    let mut board = MemoryBoard::new(vec![
        Footprint::new("SW1", "A"),
        Footprint::new("SW2", "B"),
        Footprint::new("D1", ""),
        Footprint::new("D2", ""),
    ]);
    let keys = vec![PlacedKey::unit("A", 0.0, 0.0), PlacedKey::unit("B", 1.0, 0.0)];
    place_layout(&mut board, &keys, &PlacementConfig::default()).unwrap();
    assert_eq!(board.refresh_count, 1);
}

#[test]
fn invalid_config_is_rejected_before_touching_board() {
    let mut board = RecordingBoard::new(&[("SW1", "A")]);
    let config = PlacementConfig {
        pitch: -1.0,
        ..PlacementConfig::default()
    };
    let err = place_layout(&mut board, &[PlacedKey::unit("A", 0.0, 0.0)], &config).unwrap_err();
    assert!(matches!(err, PcbError::InvalidConfig(_)));
    assert!(board.calls.is_empty());
}
