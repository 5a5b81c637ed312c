use triage_types::{
    AnswerStore, AnswerValue, Question, QuestionKind, QuestionSet, find_first_unanswered,
};

use crate::transition::{Animation, Direction, Stage};

/// Snapshot of what the renderer shows for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    /// Cursor position, zero-based.
    pub index: usize,
    /// Number of questions in the survey.
    pub total: usize,
    pub question: Question,
    /// The answer currently displayed in the controls.
    pub draft: AnswerValue,
}

impl QuestionView {
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.total
    }
}

/// The cursor over a survey's questions, plus the answers collected so far.
///
/// Renderer input edits the *draft*, the answer shown for the current
/// question. The draft is persisted into the [`AnswerStore`] whenever the
/// cursor moves (and on [`commit`](Self::commit)), and restored from the
/// store for the question the cursor lands on.
#[derive(Debug, Clone)]
pub struct Wizard {
    questions: QuestionSet,
    answers: AnswerStore,
    /// Always a valid index into `questions`.
    cursor: usize,
    draft: AnswerValue,
}

impl Wizard {
    /// Start a wizard on the first question with every answer empty.
    pub fn new(questions: QuestionSet) -> Self {
        let answers = AnswerStore::for_questions(&questions);
        let draft = AnswerValue::empty_for(questions.questions()[0].kind());
        Self {
            questions,
            answers,
            cursor: 0,
            draft,
        }
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// The persisted answers. Does not include an uncommitted draft.
    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The question under the cursor.
    pub fn current(&self) -> &Question {
        &self.questions.questions()[self.cursor]
    }

    pub fn draft(&self) -> &AnswerValue {
        &self.draft
    }

    pub fn can_move_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_move_next(&self) -> bool {
        self.cursor < self.questions.last_index()
    }

    pub fn view(&self) -> QuestionView {
        QuestionView {
            index: self.cursor,
            total: self.questions.len(),
            question: self.current().clone(),
            draft: self.draft.clone(),
        }
    }

    // === Renderer input ===

    /// Pick an option of the current single-select question.
    ///
    /// Returns `false` if the question is not single-select or `option` is
    /// not one of its options.
    pub fn choose(&mut self, option: &str) -> bool {
        let offered = match self.current().kind() {
            QuestionKind::SingleSelect(choice) => choice.contains(option),
            _ => false,
        };
        if offered {
            self.draft = AnswerValue::Text(option.to_string());
        }
        offered
    }

    /// Replace the text of the current free-text question.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        match self.current().kind() {
            QuestionKind::FreeText(_) => {
                self.draft = AnswerValue::Text(text.into());
                true
            }
            _ => false,
        }
    }

    /// Mutable access to the free text being edited, for per-key editing.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match (self.questions.questions()[self.cursor].kind(), &mut self.draft) {
            (QuestionKind::FreeText(_), AnswerValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Flip an option of the current multi-select question.
    ///
    /// The "None of these" rule is applied immediately, so the draft is
    /// consistent before the user navigates away. Returns whether the option
    /// is selected afterwards, or `None` if the question is not multi-select
    /// or does not offer `option`.
    pub fn toggle(&mut self, option: &str) -> Option<bool> {
        let offered = match self.questions.questions()[self.cursor].kind() {
            QuestionKind::MultiSelect(choice) => choice.contains(option),
            _ => false,
        };
        if !offered {
            return None;
        }
        self.draft
            .as_selection_mut()
            .map(|selection| selection.toggle(option))
    }

    // === Navigation ===

    /// Persist the draft into the answer store.
    pub fn commit(&mut self) {
        let question = &self.questions.questions()[self.cursor];
        if let Err(err) = self.answers.set(question, self.draft.clone()) {
            tracing::warn!(%err, "draft not persisted");
        }
    }

    /// Persist the draft and advance. A no-op returning `None` on the last
    /// question.
    pub fn move_next(&mut self) -> Option<usize> {
        self.commit();
        let target = self.target(Direction::Forward)?;
        self.land_on(target);
        Some(target)
    }

    /// Persist the draft and go back. A no-op returning `None` on the first
    /// question.
    pub fn move_previous(&mut self) -> Option<usize> {
        self.commit();
        let target = self.target(Direction::Backward)?;
        self.land_on(target);
        Some(target)
    }

    /// Persist the draft and put the cursor on `index`, if it is in bounds.
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.commit();
        if index >= self.questions.len() {
            return false;
        }
        self.land_on(index);
        true
    }

    /// Persist the draft and move one step with an animated transition.
    ///
    /// The stage plays the exit animation on the current question; only once
    /// that has finished does the cursor move and the stage swap content; the
    /// entry animation starts after the swap. Out of bounds is a no-op with no
    /// animation.
    pub async fn navigate<S>(
        &mut self,
        direction: Direction,
        stage: &mut S,
    ) -> Result<Option<usize>, S::Error>
    where
        S: Stage + ?Sized,
    {
        self.commit();
        let Some(target) = self.target(direction) else {
            return Ok(None);
        };

        tracing::debug!(from = self.cursor, to = target, ?direction, "transition");
        stage.play(Animation::exit(direction), &self.view()).await?;

        self.land_on(target);
        let view = self.view();
        stage.swap(&view)?;

        stage.play(Animation::entry(direction), &view).await?;
        Ok(Some(target))
    }

    /// Index of the first unanswered question, after persisting the draft.
    pub fn first_unanswered(&mut self) -> Option<usize> {
        self.commit();
        find_first_unanswered(&self.questions, &self.answers)
    }

    /// Empty every answer and go back to the first question.
    pub fn reset(&mut self) {
        self.answers.clear();
        self.cursor = 0;
        let first = &self.questions.questions()[0];
        self.draft = AnswerValue::empty_for(first.kind());
        tracing::debug!("wizard reset");
    }

    fn target(&self, direction: Direction) -> Option<usize> {
        match direction {
            Direction::Forward if self.can_move_next() => Some(self.cursor + 1),
            Direction::Backward if self.can_move_previous() => Some(self.cursor - 1),
            _ => None,
        }
    }

    /// Move the cursor and restore the stored answer into the draft.
    fn land_on(&mut self, index: usize) {
        self.cursor = index;
        let question = &self.questions.questions()[index];
        self.draft = self
            .answers
            .answer(question)
            .cloned()
            .unwrap_or_else(|| AnswerValue::empty_for(question.kind()));
        tracing::debug!(cursor = index, "moved");
    }
}
