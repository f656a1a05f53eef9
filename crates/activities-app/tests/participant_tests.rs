//! Incremental roster patches: count/heading/placeholder consistency and
//! escaping of user-supplied values.

use activities_app::surface::classes;
use activities_app::{
    ActivityDirectory, ActivityRenderer, Board, CardId, EntryId, Messages, ParticipantListManager,
    SurfaceError,
};
use activities_testkit::{directory_json, ActivityFixture, MemorySurface, SurfaceOp};
use assert_matches::assert_matches;
use proptest::prelude::*;

struct Harness {
    surface: MemorySurface,
    board: Board,
    manager: ParticipantListManager,
}

impl Harness {
    fn new(fixtures: &[ActivityFixture<'_>]) -> Self {
        let renderer = ActivityRenderer::new(Messages::default());
        let directory = ActivityDirectory::from_json(&directory_json(fixtures)).unwrap();
        let mut surface = MemorySurface::new();
        let mut board = Board::new();
        renderer.render(&mut surface, &mut board, &directory).unwrap();
        Self {
            surface,
            board,
            manager: ParticipantListManager::new(renderer),
        }
    }

    fn card(&self, activity: &str) -> CardId {
        self.board.card_for_activity(activity).unwrap().id()
    }

    fn add(&mut self, activity: &str, email: &str) -> EntryId {
        self.try_add(activity, email).unwrap()
    }

    fn try_add(&mut self, activity: &str, email: &str) -> Result<EntryId, SurfaceError> {
        let card = self.card(activity);
        self.manager
            .add_participant(&mut self.surface, &mut self.board, card, email)
    }

    fn remove(&mut self, entry: EntryId) -> Result<(), SurfaceError> {
        self.manager
            .remove_participant(&mut self.surface, &mut self.board, entry)
            .map(|_| ())
    }

    /// Heading, placeholder and spots-left agree with the entries actually
    /// listed, and with the board model.
    fn assert_consistent(&self) {
        for model in self.board.cards() {
            let activity = model.activity();
            let emails = self.surface.participant_emails(activity);
            let count = emails.len();

            assert_eq!(self.surface.heading_count(activity), Some(count), "{activity}");
            assert_eq!(self.surface.has_placeholder(activity), count == 0, "{activity}");
            assert_eq!(
                self.surface.spots_left(activity),
                Some(i64::from(model.max_participants()) - count as i64),
                "{activity}"
            );
            assert_eq!(model.count(), count);

            let modeled: Vec<&str> = model.entries().iter().map(|e| e.email.as_str()).collect();
            assert_eq!(emails, modeled);
        }
    }
}

#[test]
fn test_add_to_empty_card_replaces_placeholder() {
    let mut h = Harness::new(&[ActivityFixture::new("Gym Class", 30, &[])]);
    assert!(h.surface.has_placeholder("Gym Class"));

    h.add("Gym Class", "new@x.com");

    assert!(!h.surface.has_placeholder("Gym Class"));
    assert_eq!(h.surface.participant_emails("Gym Class"), vec!["new@x.com"]);
    assert_eq!(h.surface.heading("Gym Class").as_deref(), Some("Participants (1)"));
    assert_eq!(h.surface.spots_left("Gym Class"), Some(29));
    h.assert_consistent();
}

#[test]
fn test_removing_last_entry_restores_placeholder() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])]);
    let entry = h.surface.entry_ids("Chess Club")[0];

    h.remove(entry).unwrap();

    assert!(h.surface.has_placeholder("Chess Club"));
    assert_eq!(h.surface.heading_count("Chess Club"), Some(0));
    assert_eq!(h.surface.spots_left("Chess Club"), Some(10));
    // Exactly one placeholder, no stray items.
    assert_eq!(h.surface.list_items("Chess Club").len(), 1);
}

#[test]
fn test_remove_only_touches_one_entry_of_duplicate_emails() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])]);
    let second = h.add("Chess Club", "a@x.com");

    h.remove(second).unwrap();

    assert_eq!(h.surface.participant_emails("Chess Club"), vec!["a@x.com"]);
    assert_eq!(h.surface.entry_ids("Chess Club").len(), 1);
    h.assert_consistent();
}

#[test]
fn test_stale_entry_is_rejected() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])]);
    let entry = h.surface.entry_ids("Chess Club")[0];
    h.remove(entry).unwrap();

    assert_matches!(h.remove(entry), Err(SurfaceError::UnknownEntry(e)) if e == entry);
    h.assert_consistent();
}

// ============================================================================
// Rejected patches
// ============================================================================

#[test]
fn test_rejected_append_rolls_back_board() {
    let mut h = Harness::new(&[ActivityFixture::new("Gym", 5, &[])]);
    h.surface.inject_fault(SurfaceOp::AppendParticipant);

    assert_matches!(h.try_add("Gym", "new@x.com"), Err(SurfaceError::Dom(_)));

    assert_eq!(h.board.card_for_activity("Gym").unwrap().count(), 0);
    assert!(h.surface.participant_emails("Gym").is_empty());
    assert!(h.surface.has_placeholder("Gym"));
    assert_eq!(h.surface.heading("Gym").as_deref(), Some("Participants (0)"));
    assert_eq!(h.surface.spots_left("Gym"), Some(5));
    h.assert_consistent();

    h.add("Gym", "new@x.com");
    assert_eq!(h.surface.participant_emails("Gym"), vec!["new@x.com"]);
    h.assert_consistent();
}

#[test]
fn test_rejected_heading_after_append_is_rewritten() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])]);
    h.surface.inject_fault(SurfaceOp::SetHeading);

    assert_matches!(h.try_add("Chess Club", "b@x.com"), Err(SurfaceError::Dom(_)));

    assert_eq!(h.surface.participant_emails("Chess Club"), vec!["a@x.com", "b@x.com"]);
    assert_eq!(h.surface.heading_count("Chess Club"), Some(2));
    assert!(h.surface.active_faults().is_empty());
    h.assert_consistent();
}

#[test]
fn test_rejected_removal_keeps_entry() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com", "b@x.com"])]);
    let entry = h.surface.entry_ids("Chess Club")[0];
    h.surface.inject_fault(SurfaceOp::RemoveParticipant);

    assert_matches!(h.remove(entry), Err(SurfaceError::Dom(_)));

    assert!(h.board.locate_entry(entry).is_some());
    assert_eq!(h.surface.participant_emails("Chess Club"), vec!["a@x.com", "b@x.com"]);
    h.assert_consistent();

    h.remove(entry).unwrap();
    assert_eq!(h.surface.participant_emails("Chess Club"), vec!["b@x.com"]);
    h.assert_consistent();
}

#[test]
fn test_rejected_placeholder_on_last_removal_is_recovered() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &["a@x.com"])]);
    let entry = h.surface.entry_ids("Chess Club")[0];
    h.surface.inject_fault(SurfaceOp::InsertPlaceholder);

    assert_matches!(h.remove(entry), Err(SurfaceError::Dom(_)));

    assert!(h.board.locate_entry(entry).is_none());
    assert!(h.surface.has_placeholder("Chess Club"));
    assert_eq!(h.surface.list_items("Chess Club").len(), 1);
    h.assert_consistent();
}

#[test]
fn test_over_capacity_goes_negative() {
    let mut h = Harness::new(&[ActivityFixture::new("Tiny", 1, &["a@x.com"])]);

    h.add("Tiny", "b@x.com");

    assert_eq!(h.surface.spots_left("Tiny"), Some(-1));
    h.assert_consistent();
}

#[test]
fn test_patches_are_scoped_to_their_card() {
    let mut h = Harness::new(&[
        ActivityFixture::new("Chess Club", 12, &["michael@mergington.edu"]),
        ActivityFixture::new("Gym Class", 30, &[]),
    ]);

    h.add("Gym Class", "g@x.com");

    assert_eq!(
        h.surface.participant_emails("Chess Club"),
        vec!["michael@mergington.edu"]
    );
    assert_eq!(h.surface.spots_left("Chess Club"), Some(11));
    h.assert_consistent();
}

// ----------------------------------------------------------------------------
// Escaping
// ----------------------------------------------------------------------------

const HOSTILE: &str = r#"<img src=x onerror="alert('x')">@x.com"#;

#[test]
fn test_added_email_is_text_not_markup() {
    let mut h = Harness::new(&[ActivityFixture::new("Chess Club", 10, &[])]);

    h.add("Chess Club", HOSTILE);

    assert_eq!(h.surface.participant_emails("Chess Club"), vec![HOSTILE]);
    let markup = h.surface.container_markup();
    assert!(!markup.contains("<img"));
    assert!(markup.contains("&lt;img src=x onerror=&quot;alert(&#39;x&#39;)&quot;&gt;@x.com"));

    // The email is the only content of its item apart from the remove control.
    let item = h.surface.list_items("Chess Club")[0];
    assert_eq!(
        item.child_elements().filter(|e| e.tag() == "img").count(),
        0
    );
}

#[test]
fn test_hostile_activity_name_is_escaped_everywhere() {
    let name = r#"<b>Chess</b> & "Go""#;
    let mut h = Harness::new(&[ActivityFixture::new(name, 10, &["a@x.com"])]);
    h.add(name, "b@x.com");

    let markup = h.surface.container_markup();
    assert!(!markup.contains("<b>"));
    assert!(markup.contains("&lt;b&gt;Chess&lt;/b&gt; &amp; &quot;Go&quot;"));

    let remove = h.surface.list_items(name)[1]
        .find_by_class(classes::PARTICIPANT_REMOVE)
        .unwrap()
        .clone();
    assert_eq!(
        remove.attribute("aria-label"),
        Some(format!("Remove b@x.com from {name}").as_str())
    );
    assert_eq!(h.surface.option_values()[1], name);
}

// ----------------------------------------------------------------------------
// Random add/remove sequences
// ----------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Op {
    Add { card: usize, email: String },
    Remove { pick: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3, "[a-z<>&\"']{1,8}@x\\.com")
            .prop_map(|(card, email)| Op::Add { card, email }),
        any::<usize>().prop_map(|pick| Op::Remove { pick }),
    ]
}

const NAMES: [&str; 3] = ["Chess Club", "Programming Class", "Gym Class"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_rosters_stay_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut h = Harness::new(&[
            ActivityFixture::new(NAMES[0], 3, &["michael@mergington.edu"]),
            ActivityFixture::new(NAMES[1], 20, &["emma@mergington.edu", "sophia@mergington.edu"]),
            ActivityFixture::new(NAMES[2], 30, &[]),
        ]);

        for op in ops {
            match op {
                Op::Add { card, email } => {
                    h.add(NAMES[card], &email);
                }
                Op::Remove { pick } => {
                    let live: Vec<EntryId> = NAMES
                        .iter()
                        .flat_map(|name| h.surface.entry_ids(name))
                        .collect();
                    if !live.is_empty() {
                        h.remove(live[pick % live.len()]).unwrap();
                    }
                }
            }
            h.assert_consistent();
        }

        let markup = h.surface.container_markup();
        prop_assert!(!markup.contains("<@"));
        prop_assert!(!markup.contains("\"@"));
    }
}
