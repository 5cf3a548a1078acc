//! Trial of Craft - auditing the Death Network's routing code
//!
//! The player reviews a legacy soul-routing listing through a sliding
//! inspection window and reports defects by line and classification.
//! Twenty confirmed discoveries pass the trial; sloppy searching and
//! hints erode the score.

use necroshell_data::content::{BugDefinition, BugKind};
use serde::{Deserialize, Serialize};

/// Discoveries required to pass
pub const MIN_BUGS_TO_PASS: usize = 20;
/// Largest bug table accepted
pub const MAX_BUGS: usize = 50;
/// Context lines shown on each side of an inspected line
pub const CONTEXT_LINES: u32 = 5;
/// Inspections beyond this count cost score
pub const FREE_INSPECTIONS: u32 = 50;

/// The audited legacy listing: the Death Network's soul routing system.
const ROUTING_SYSTEM_SOURCE: &str = "\
/* Death Network Soul Routing System v3.14 */
/* WARNING: Legacy code with known issues */

#include <soul.h>
#include <routing.h>

#define MAX_QUEUE 1000
#define REINCARNATION_LIMIT 999

typedef struct {
    soul_t* queue[MAX_QUEUE];
    int front, rear;
} soul_queue_t;

/* Queue starts with whatever garbage the void left behind */
soul_queue_t reincarnation_queue;

/* Route soul to destination */
int route_soul(soul_t* soul) {
    if (!soul) return -1;

    /* Calculate karma score */
    int karma = calculate_karma(soul);

    /* Children under 5 are not special-cased */
    if (karma > 0) {
        send_to_heaven(soul);
    } else if (karma < 0) {
        send_to_hell(soul);
    } else {
        /* Neutral - reincarnate */
        queue_for_reincarnation(soul);
    }
    return 0;
}

/* Queue soul for reincarnation */
void queue_for_reincarnation(soul_t* soul) {
    /* rear is never checked against MAX_QUEUE */
    reincarnation_queue.queue[reincarnation_queue.rear] = soul;
    reincarnation_queue.rear++;
}

/* Process reincarnation queue */
void process_reincarnations(void) {
    while (reincarnation_queue.front < reincarnation_queue.rear) {
        soul_t* soul = reincarnation_queue.queue[reincarnation_queue.front];

        /* Reincarnation count wraps to 0 past the limit */
        soul->reincarnation_count++;

        if (soul->reincarnation_count > REINCARNATION_LIMIT) {
            /* Soul exhausted - send to void */
            free(soul);
        } else {
            reincarnate(soul);
        }

        reincarnation_queue.front++;
    }
}

/* Calculate karma score */
int calculate_karma(soul_t* soul) {
    int score = 0;

    for (int i = 0; i < soul->deed_count; i++) {
        for (int j = 0; j < soul->deed_count; j++) {
            if (i == j) {
                score += soul->deeds[i].karma_value;
            }
        }
    }

    return score;
}

/* Transfer soul data */
soul_t* transfer_soul(soul_t* source) {
    soul_t* dest = malloc(sizeof(soul_t));
    memcpy(dest, source, sizeof(soul_t));

    /* Pointers shared between source and dest */
    dest->deeds = source->deeds;
    dest->memories = source->memories;

    return dest;
}

/* Judge soul based on final moments */
void judge_final_moments(soul_t* soul) {
    moment_t* final = soul->final_moment;

    if (final->type == MOMENT_SACRIFICE) {
        soul->karma += 1000;
    } else if (final->type == MOMENT_MURDER) {
        soul->karma -= 1000;
    }
}

/* Find a soul the slow way */
soul_t* find_soul_by_id(uint64_t id) {
    for (int i = 0; i < global_soul_count; i++) {
        if (global_souls[i].id == id) {
            return &global_souls[i];
        }
    }
    return NULL;
}

/* Check if soul qualifies for Heaven */
bool qualifies_for_heaven(soul_t* soul) {
    if (soul->karma = 0) {
        return false;
    }

    return soul->karma >= HEAVEN_THRESHOLD;
}

/* Eternal punishment queue */
void add_to_hell_queue(soul_t* soul) {
    /* Mentally ill treated the same as malicious */
    hell_queue_push(soul);
}

/* Soul merge for twin flames */
soul_t* merge_souls(soul_t* s1, soul_t* s2) {
    soul_t* merged = create_soul();

    merged->karma = s1->karma + s2->karma;

    merged->deeds = malloc(sizeof(deed_t) * 1000);
    free(merged->deeds);
    merged->deeds = malloc(sizeof(deed_t) * (s1->deed_count + s2->deed_count));

    return merged;
}
";

/// One defect plus the player's audit progress against it
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugRecord {
    pub bug: BugDefinition,
    pub discovered: bool,
    pub correctly_classified: bool,
}

/// Audit state for the fourth trial
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalTrial {
    active: bool,
    bugs: Vec<BugRecord>,
    source_lines: Vec<String>,
    view_start: u32,
    view_end: u32,
    bugs_discovered: usize,
    bugs_reported_correctly: usize,
    inspections_made: u32,
    hint_shown: bool,
}

impl Default for TechnicalTrial {
    fn default() -> Self {
        Self::new()
    }
}

impl TechnicalTrial {
    pub fn new() -> Self {
        Self {
            active: false,
            bugs: Vec::new(),
            source_lines: Vec::new(),
            view_start: 0,
            view_end: 0,
            bugs_discovered: 0,
            bugs_reported_correctly: 0,
            inspections_made: 0,
            hint_shown: false,
        }
    }

    /// Reset and begin the audit against the built-in routing listing.
    /// The bug table is capped at [`MAX_BUGS`].
    pub fn start(&mut self, bugs: Vec<BugDefinition>) {
        self.start_with_source(bugs, ROUTING_SYSTEM_SOURCE);
    }

    /// Same, with a caller-supplied listing.
    pub fn start_with_source(&mut self, mut bugs: Vec<BugDefinition>, source: &str) {
        if bugs.len() > MAX_BUGS {
            tracing::warn!(count = bugs.len(), "bug table truncated to {MAX_BUGS}");
            bugs.truncate(MAX_BUGS);
        }

        self.bugs = bugs
            .into_iter()
            .map(|bug| BugRecord {
                bug,
                discovered: false,
                correctly_classified: false,
            })
            .collect();
        self.source_lines = source.lines().map(str::to_owned).collect();

        self.active = true;
        self.view_start = 0;
        self.view_end = 0;
        self.bugs_discovered = 0;
        self.bugs_reported_correctly = 0;
        self.inspections_made = 0;
        self.hint_shown = false;
    }

    pub fn bug_count(&self) -> usize {
        self.bugs.len()
    }

    pub fn bugs_discovered(&self) -> usize {
        self.bugs_discovered
    }

    pub fn bugs_reported_correctly(&self) -> usize {
        self.bugs_reported_correctly
    }

    pub fn inspections_made(&self) -> u32 {
        self.inspections_made
    }

    pub fn source_line_count(&self) -> u32 {
        self.source_lines.len() as u32
    }

    /// The current inspection window as `(start, end)` line numbers.
    pub fn view_window(&self) -> (u32, u32) {
        (self.view_start, self.view_end)
    }

    /// Open an inspection window of [`CONTEXT_LINES`] either side of the
    /// requested line, clipped to the listing, and return that slice with
    /// line numbers.
    pub fn inspect(&mut self, line: u32) -> Option<String> {
        if !self.active || self.source_lines.is_empty() {
            return None;
        }

        self.inspections_made += 1;

        let start = line.saturating_sub(CONTEXT_LINES).max(1);
        let end = (line + CONTEXT_LINES).min(self.source_line_count());
        self.view_start = start;
        self.view_end = end;

        let mut view = String::new();
        for number in start..=end {
            let text = &self.source_lines[(number - 1) as usize];
            view.push_str(&format!("{number:>4}  {text}\n"));
        }
        Some(view)
    }

    /// Report a defect at a line with a classification.
    ///
    /// A matching line marks the bug discovered (idempotently for the
    /// counters); a matching kind additionally marks it correctly
    /// classified and returns `true`. No bug at the line returns `false`
    /// and changes nothing.
    pub fn report(&mut self, line: u32, kind: BugKind) -> bool {
        if !self.active {
            return false;
        }

        let Some(record) = self.bugs.iter_mut().find(|r| r.bug.line == line) else {
            return false;
        };

        if !record.discovered {
            record.discovered = true;
            self.bugs_discovered += 1;
            tracing::info!(line, "bug discovered");
        }

        if record.bug.kind == kind {
            if !record.correctly_classified {
                record.correctly_classified = true;
                self.bugs_reported_correctly += 1;
            }
            return true;
        }

        false
    }

    /// Hint for a line. Asking at all costs ten points, even for a line
    /// with nothing behind it.
    pub fn hint(&mut self, line: u32) -> Option<&str> {
        self.hint_shown = true;
        self.bugs
            .iter()
            .find(|r| r.bug.line == line)
            .map(|r| r.bug.hint.as_str())
    }

    pub fn discovered_bugs(&self) -> Vec<&BugRecord> {
        self.bugs.iter().filter(|r| r.discovered).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.bugs_discovered >= MIN_BUGS_TO_PASS || self.bugs_discovered >= self.bugs.len()
    }

    pub fn is_passed(&self) -> bool {
        self.bugs_discovered >= MIN_BUGS_TO_PASS
    }

    /// Score: discovery share of the table, a classification bonus, an
    /// over-inspection penalty past [`FREE_INSPECTIONS`], and a flat hint
    /// penalty; clamped to `[0, 100]`.
    pub fn score(&self) -> f32 {
        if self.bugs.is_empty() {
            return 0.0;
        }

        let base = self.bugs_discovered as f32 / self.bugs.len() as f32 * 100.0;

        let classification_bonus = if self.bugs_discovered > 0 {
            self.bugs_reported_correctly as f32 / self.bugs_discovered as f32 * 10.0
        } else {
            0.0
        };

        let inspection_penalty = if self.inspections_made > FREE_INSPECTIONS {
            (self.inspections_made - FREE_INSPECTIONS) as f32 * 0.5
        } else {
            0.0
        };

        let hint_penalty = if self.hint_shown { 10.0 } else { 0.0 };

        (base + classification_bonus - inspection_penalty - hint_penalty).clamp(0.0, 100.0)
    }

    /// Progress summary for the UI.
    pub fn stats(&self) -> String {
        format!(
            "Bugs discovered: {} / {}\nCorrectly classified: {} / {}\n\
             Inspections made: {}\nPass threshold: {} bugs\nStatus: {}",
            self.bugs_discovered,
            self.bugs.len(),
            self.bugs_reported_correctly,
            self.bugs_discovered,
            self.inspections_made,
            MIN_BUGS_TO_PASS,
            if self.is_passed() { "PASSED" } else { "IN PROGRESS" },
        )
    }
}
