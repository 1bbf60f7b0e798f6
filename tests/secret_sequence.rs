use homeboard::board::sequence::{LayoutClick, SecretSequence};
use LayoutClick::{Custom, Grid};

#[test]
fn the_documented_sequence_completes() {
    let mut seq = SecretSequence::default();
    let mut completions = 0;
    for click in [Grid, Grid, Grid, Grid, Grid, Grid, Custom, Grid] {
        if seq.feed(click) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert!(seq.is_complete());
}

#[test]
fn an_early_custom_breaks_the_prefix_and_restarts_from_it() {
    let mut seq = SecretSequence::default();
    seq.feed(Grid);
    seq.feed(Grid);
    let fired = seq.feed(Custom);
    assert!(!fired);
    assert_eq!(seq.observed(), &[Custom]);
    assert!(!seq.is_complete());
}

#[test]
fn extra_grids_keep_resetting_instead_of_completing() {
    let mut seq = SecretSequence::default();
    // Seven grids in a row: the seventh breaks the prefix and restarts.
    for _ in 0..7 {
        assert!(!seq.feed(Grid));
    }
    assert_eq!(seq.progress(), 1);
    // The restart is itself a valid opening, so the sequence can still
    // complete from here.
    for _ in 0..5 {
        assert!(!seq.feed(Grid));
    }
    assert!(!seq.feed(Custom));
    assert!(seq.feed(Grid));
}

#[test]
fn completion_cooldown_allows_retriggering() {
    let mut seq = SecretSequence::default();
    let clicks = [Grid, Grid, Grid, Grid, Grid, Grid, Custom, Grid];
    for click in clicks {
        seq.feed(click);
    }
    assert!(seq.is_complete());

    std::thread::sleep(std::time::Duration::from_millis(150));

    let mut completions = 0;
    for click in clicks {
        if seq.feed(click) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
}
