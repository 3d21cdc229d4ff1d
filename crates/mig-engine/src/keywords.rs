use log::debug;
use mig_core::Candidate;

/// One concept group of the bilingual keyword table: a tag for log lines
/// plus the lowercase stems that identify the concept in English or
/// Russian names. Stems, not full words, so declensions still match
/// ("ошибка", "ошибки" both contain "ошибк").
pub(crate) struct KeywordGroup {
    pub(crate) tag: &'static str,
    stems: &'static [&'static str],
}

impl KeywordGroup {
    const fn new(tag: &'static str, stems: &'static [&'static str]) -> Self {
        Self { tag, stems }
    }

    fn matches(&self, lowercase_name: &str) -> bool {
        self.stems.iter().any(|stem| lowercase_name.contains(stem))
    }
}

/// Tracker concepts, tested in table order.
pub(crate) const TRACKER_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("bug", &["bug", "defect", "ошибк", "дефект"]),
    KeywordGroup::new("task", &["task", "задач"]),
    KeywordGroup::new("feature", &["feature", "функци", "возможност"]),
    KeywordGroup::new("request", &["request", "support", "запрос", "поддержк"]),
    KeywordGroup::new("build", &["build", "сборк"]),
    KeywordGroup::new("process", &["process", "процесс"]),
];

// "новая"/"новый" rather than the bare stem: "приостановлена" contains
// "нов", and the new group is tested first.
/// Status concepts, tested in table order.
pub(crate) const STATUS_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("new", &["new", "новая", "новый", "открыт"]),
    KeywordGroup::new("in_progress", &["progress", "работ", "выполняетс"]),
    KeywordGroup::new("done", &["done", "resolved", "решен", "выполнен"]),
    KeywordGroup::new("closed", &["closed", "закрыт"]),
    KeywordGroup::new("on_hold", &["hold", "приостанов", "отложен"]),
    KeywordGroup::new("testing", &["test", "тест"]),
    KeywordGroup::new("completed", &["complet", "заверш"]),
    KeywordGroup::new("waiting", &["waiting", "feedback", "ожида", "обратн"]),
];

/// Priority concepts, tested in table order.
pub(crate) const PRIORITY_GROUPS: &[KeywordGroup] = &[
    KeywordGroup::new("low", &["low", "низк", "минор"]),
    KeywordGroup::new("normal", &["normal", "обычн", "нормальн", "средн"]),
    KeywordGroup::new("high", &["high", "высок", "важн"]),
    KeywordGroup::new("urgent", &["urgent", "immediate", "critical", "срочн", "критичн", "немедленн"]),
];

/// First candidate sharing a keyword group with `source_name`, walking
/// the group table in order. The group coupling is what lets a Russian
/// source name find its English target counterpart.
pub(crate) fn keyword_match(
    source_name: &str,
    candidates: &[Candidate],
    groups: &[KeywordGroup],
) -> Option<u64> {
    let source_lower = source_name.to_lowercase();

    for group in groups {
        if !group.matches(&source_lower) {
            continue;
        }

        for candidate in candidates {
            if group.matches(&candidate.name.to_lowercase()) {
                debug!(
                    "keyword group {} pairs {:?} with {:?} (#{})",
                    group.tag, source_name, candidate.name, candidate.id
                );
                return Some(candidate.id);
            }
        }
    }

    None
}
