//! Prompt store
//!
//! Owns the canonical prompt list, newest-first (new items prepended).
//! Every mutation rewrites the whole collection to storage. Prompts
//! reference their category by display name, not id; a name matching no
//! current category is tolerated and simply falls outside category
//! filters.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{new_id, now_millis, persist, Db, KEY_PROMPTS};

/// Fixed label used when no category is given or a category is removed
pub const UNCLASSIFIED: &str = "미분류";

/// Suffix appended to the title of a duplicated prompt
pub const COPY_SUFFIX: &str = " (복사)";

/// Fixed base timestamp shared by all seed records
pub(crate) const SEED_BASE_TS: i64 = 1_700_000_000_000;

/// A saved reusable prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub favorite: bool,
}

/// Validated input for create/update operations; never stored directly
///
/// `tags: None` encodes "the raw input was not array-shaped": `add`
/// coerces it to an empty list, `update` leaves the existing tags
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptFormData {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Option<Vec<String>>,
}

pub struct PromptStore {
    db: Db,
    prompts: Vec<Prompt>,
}

impl PromptStore {
    /// Load the stored collection, falling back to the seed set on
    /// first run or when the stored entry fails to parse
    pub fn load(db: Db) -> Self {
        let prompts = match db.get_json::<Vec<Prompt>>(KEY_PROMPTS) {
            Ok(Some(stored)) => stored,
            Ok(None) => seed_prompts(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse stored prompts, reseeding");
                seed_prompts()
            },
        };
        let store = Self { db, prompts };
        persist(&store.db, KEY_PROMPTS, &store.prompts);
        store
    }

    pub fn all(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Create a prompt from form data and prepend it; returns the new id
    pub fn add(&mut self, data: PromptFormData) -> String {
        let prompt = build_prompt(data, now_millis());
        let id = prompt.id.clone();
        self.prompts.insert(0, prompt);
        self.persist();
        id
    }

    /// Create one prompt per form entry, all sharing a single timestamp,
    /// prepended as a block in input order ahead of existing items
    ///
    /// Validation is the parser's job; every entry is added. Returns the
    /// number added.
    pub fn add_many(&mut self, data_list: Vec<PromptFormData>) -> usize {
        if data_list.is_empty() {
            return 0;
        }
        let now = now_millis();
        let block: Vec<Prompt> = data_list
            .into_iter()
            .map(|data| build_prompt(data, now))
            .collect();
        let count = block.len();
        self.prompts.splice(0..0, block);
        self.persist();
        count
    }

    /// Replace title/content (always), category (when non-blank) and
    /// tags (when array-shaped), bumping `updated_at`. No-op on an
    /// unknown id.
    pub fn update(&mut self, id: &str, data: PromptFormData) {
        if let Some(p) = self.prompts.iter_mut().find(|p| p.id == id) {
            p.title = data.title;
            p.content = data.content;
            if !data.category.is_empty() {
                p.category = data.category;
            }
            if let Some(tags) = data.tags {
                p.tags = tags;
            }
            p.updated_at = now_millis();
            self.persist();
        }
    }

    /// Remove the prompt with the given id; no-op when absent
    pub fn delete(&mut self, id: &str) {
        let before = self.prompts.len();
        self.prompts.retain(|p| p.id != id);
        if self.prompts.len() != before {
            self.persist();
        }
    }

    /// Flip the favorite flag. Deliberately does NOT bump `updated_at`,
    /// matching the shipped behavior the favorites panel sorts by.
    pub fn toggle_favorite(&mut self, id: &str) {
        if let Some(p) = self.prompts.iter_mut().find(|p| p.id == id) {
            p.favorite = !p.favorite;
            self.persist();
        }
    }

    /// Clone an existing prompt under a new id with fresh timestamps,
    /// a suffixed title and favorite reset; returns None on unknown id
    pub fn duplicate(&mut self, id: &str) -> Option<String> {
        let source = self.get(id)?.clone();
        let now = now_millis();
        let copy = Prompt {
            id: new_id(),
            title: format!("{}{}", source.title, COPY_SUFFIX),
            created_at: now,
            updated_at: now,
            favorite: false,
            ..source
        };
        let new = copy.id.clone();
        self.prompts.insert(0, copy);
        self.persist();
        Some(new)
    }

    /// Move every prompt labelled `from` to the `to` category
    ///
    /// This is the one place the category-delete cascade policy lives:
    /// the orchestrating layer calls it before deleting a category.
    /// Counts as a content update, so `updated_at` is bumped.
    pub fn reassign_category(&mut self, from: &str, to: &str) -> usize {
        let now = now_millis();
        let mut moved = 0;
        for p in self.prompts.iter_mut().filter(|p| p.category == from) {
            p.category = to.to_string();
            p.updated_at = now;
            moved += 1;
        }
        if moved > 0 {
            self.persist();
        }
        moved
    }

    pub fn count_by_category(&self, name: &str) -> usize {
        self.prompts.iter().filter(|p| p.category == name).count()
    }

    fn persist(&self) {
        persist(&self.db, KEY_PROMPTS, &self.prompts);
    }
}

fn build_prompt(data: PromptFormData, now: i64) -> Prompt {
    Prompt {
        id: new_id(),
        title: data.title,
        content: data.content,
        category: if data.category.is_empty() {
            UNCLASSIFIED.to_string()
        } else {
            data.category
        },
        tags: data.tags.unwrap_or_default(),
        created_at: now,
        updated_at: now,
        favorite: false,
    }
}

fn seed(id: &str, title: &str, content: &str, category: &str, tags: &[&str], offset: i64) -> Prompt {
    Prompt {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_at: SEED_BASE_TS + offset,
        updated_at: SEED_BASE_TS + offset,
        favorite: false,
    }
}

/// Example prompts for high-school teachers, two per default category
static SEED_PROMPTS: Lazy<Vec<Prompt>> = Lazy::new(|| {
    vec![
        seed(
            "seed-teaching-1",
            "개념을 학생 수준으로 설명해 달라",
            "다음 개념을 고등학생이 이해할 수 있도록 쉽게 설명해 주세요.\n- 어려운 용어는 비유나 일상 예시를 들어 설명해 주세요.\n- 단계별로 나누어 3~5문장 이내로 요약해 주세요.\n\n[여기에 설명할 개념이나 단원명을 입력하세요]",
            "수업·강의",
            &["개념설명", "수업", "비유"],
            0,
        ),
        seed(
            "seed-teaching-2",
            "수업용 토론·활동 주제 생성",
            "다음 단원/주제에 맞는 수업용 토론 주제 또는 소규모 활동 주제를 3개 제안해 주세요.\n- 학생들이 찬반이나 의견을 나눌 수 있는 질문 형태로 작성해 주세요.\n- 예상 소요 시간과 진행 방법을 한 줄씩 첨부해 주세요.\n\n[단원명 또는 주제를 입력하세요]",
            "수업·강의",
            &["토론", "활동", "수업설계"],
            1,
        ),
        seed(
            "seed-assessment-1",
            "서술형 문항 출제",
            "다음 학습 목표에 맞는 서술형 문항을 2문항 출제해 주세요.\n- 문항별 배점과 채점 포인트(핵심 키워드·개념)를 함께 제시해 주세요.\n- 고등학교 [학년/과목] 수준으로 난이도를 맞춰 주세요.\n\n[학습 목표 또는 단원을 입력하세요]",
            "평가·채점",
            &["서술형", "출제", "채점기준"],
            2,
        ),
        seed(
            "seed-assessment-2",
            "채점 기준표(루브릭) 작성",
            "다음 과제/발표에 대한 채점 루브릭을 만들어 주세요.\n- 평가 항목 3~5개, 각 항목당 3~4단계 수준(우수/보통/미흡 등)으로 구분해 주세요.\n- 각 단계에 대한 구체적인 설명을 한 줄씩 적어 주세요.\n\n[과제명 또는 평가 대상 활동을 입력하세요]",
            "평가·채점",
            &["루브릭", "채점", "평가"],
            3,
        ),
        seed(
            "seed-guidance-1",
            "학습 조언 답변 초안",
            "학생/학부모로부터 다음과 같은 학습 고민을 제기받았다고 가정하고, 상담 답변 초안을 작성해 주세요.\n- 공감 한 줄 + 구체적 조언 2~3가지 + 마무리 격려로 구성해 주세요.\n- 학교 현장에서 바로 참고할 수 있는 실천 가능한 내용으로 작성해 주세요.\n\n[고민 내용을 입력하세요]",
            "학습지도·상담",
            &["상담", "학습조언", "멘토링"],
            4,
        ),
        seed(
            "seed-guidance-2",
            "진로·진학 상담 참고 답변",
            "다음과 같은 진로/진학 관련 질문에 대해, 상담 시 참고할 수 있는 답변 포인트를 정리해 주세요.\n- 관련 정보(전형, 과목, 기관 등)를 요약하고, 학생에게 전달할 핵심 메시지 2~3가지를 bullet로 제시해 주세요.\n\n[학생의 질문 또는 관심 분야를 입력하세요]",
            "학습지도·상담",
            &["진로", "진학", "상담"],
            5,
        ),
        seed(
            "seed-class-1",
            "학부모 상담/안내문 초안",
            "다음 상황에 맞는 학부모 대상 안내문 또는 상담 시 참고할 말씀 초안을 작성해 주세요.\n- 존댓말, 공식적인 톤을 유지해 주세요.\n- 일시·장소·준비물·문의처 등 필요한 항목을 포함해 주세요.\n\n[안내할 일정·행사·상담 주제를 입력하세요]",
            "학급·행정",
            &["학부모", "안내문", "공지"],
            6,
        ),
        seed(
            "seed-class-2",
            "학급 규칙·공지 문구",
            "다음 내용을 학급 게시나 SNS 공지용으로 쓸 수 있는 짧은 문구로 다듬어 주세요.\n- 2~3문장 이내로, 학생이 한눈에 이해할 수 있게 작성해 주세요.\n- 필요 시 주의·당부 문구 한 줄을 추가해 주세요.\n\n[공지할 내용을 입력하세요]",
            "학급·행정",
            &["학급규칙", "공지", "문구"],
            7,
        ),
        seed(
            "seed-materials-1",
            "워크시트·활동지 문항 생성",
            "다음 단원/주제에 맞는 워크시트 또는 활동지용 문항을 5개 만들어 주세요.\n- 빈칸 채우기, O/X, 단답형, 1~2줄 서술 등 형태를 섞어 주세요.\n- 문항 아래에 답 또는 참고 답안을 괄호로 표시해 주세요.\n\n[단원명 또는 주제를 입력하세요]",
            "자료·연구",
            &["워크시트", "활동지", "문항"],
            8,
        ),
        seed(
            "seed-materials-2",
            "수업 참고 자료 요약·정리",
            "아래 글/자료를 수업 준비용으로 A4 한 페이지 분량으로 요약·정리해 주세요.\n- 핵심 개념, 수업에 활용할 수 있는 발문 2~3개, 주의할 점을 구분해 정리해 주세요.\n\n[요약할 자료 내용 또는 링크 설명을 입력하세요]",
            "자료·연구",
            &["요약", "자료정리", "수업준비"],
            9,
        ),
    ]
});

/// The fixed first-run prompt set
pub fn seed_prompts() -> Vec<Prompt> {
    SEED_PROMPTS.clone()
}
