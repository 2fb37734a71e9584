use crate::models::{AppState, ChoiceId, Question};

pub struct App {
    pub state: AppState,
    questions: Vec<Question>,
    current_question_index: usize,
    cursor: usize,
    picked: Vec<ChoiceId>,
    answers: Vec<Option<Vec<ChoiceId>>>,
    earned: Vec<u32>,
    status_message: Option<String>,
    result_scroll: usize,
}

impl App {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let num_questions = questions.len();

        Self {
            state: AppState::Welcome,
            questions,
            current_question_index: 0,
            cursor: 0,
            picked: Vec::new(),
            answers: vec![None; num_questions],
            earned: vec![0; num_questions],
            status_message: None,
            result_scroll: 0,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Index of the highlighted choice in the current question.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_picked(&self, id: ChoiceId) -> bool {
        self.picked.contains(&id)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<Vec<ChoiceId>>] {
        &self.answers
    }

    /// Points earned per question, in question order.
    pub fn earned(&self) -> &[u32] {
        &self.earned
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    fn choice_count(&self) -> usize {
        self.current_question().map_or(0, |q| q.choices().len())
    }

    pub fn select_next_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.choice_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    /// Pick or unpick the highlighted choice. Picking past the question's
    /// selection limit is refused with a status message.
    pub fn toggle_option(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };
        let Some(id) = question.choices().get(self.cursor).map(|c| c.id()) else {
            return;
        };
        let max_selections = question.max_selections();

        if let Some(position) = self.picked.iter().position(|picked| *picked == id) {
            self.picked.remove(position);
            self.status_message = None;
        } else if self.picked.len() >= max_selections {
            let noun = if max_selections == 1 { "choice" } else { "choices" };
            self.status_message = Some(format!("Select at most {} {}", max_selections, noun));
        } else {
            self.picked.push(id);
            self.status_message = None;
        }
    }

    pub fn start_quiz(&mut self) {
        self.state = if self.questions.is_empty() {
            AppState::Result
        } else {
            AppState::Quiz
        };
    }

    pub fn submit_answer(&mut self) {
        let Some(question) = self.current_question() else {
            return;
        };

        match question.grade(&self.picked) {
            Ok(points) => {
                self.earned[self.current_question_index] = points;
                self.answers[self.current_question_index] = Some(std::mem::take(&mut self.picked));
            }
            Err(err) => {
                self.status_message = Some(err.to_string());
                return;
            }
        }

        self.current_question_index += 1;
        self.cursor = 0;
        self.status_message = None;

        if self.current_question_index >= self.questions.len() {
            self.state = AppState::Result;
        }
    }

    pub fn calculate_score(&self) -> u32 {
        self.earned.iter().sum()
    }

    pub fn total_points(&self) -> u32 {
        self.questions.iter().map(Question::points).sum()
    }

    pub fn scroll_results_down(&mut self) {
        if self.result_scroll + 1 < self.questions.len() {
            self.result_scroll += 1;
        }
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.current_question_index = 0;
        self.cursor = 0;
        self.picked.clear();
        self.answers = vec![None; self.questions.len()];
        self.earned = vec![0; self.questions.len()];
        self.status_message = None;
        self.result_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_app() -> App {
        let mut single = Question::with_scoring("single", 2, 1).unwrap();
        single.add_choice("a", false).unwrap();
        single.add_choice("b", true).unwrap();

        let mut multi = Question::with_scoring("multi", 3, 2).unwrap();
        multi.add_choice("a", true).unwrap();
        multi.add_choice("b", true).unwrap();
        multi.add_choice("c", false).unwrap();

        App::with_questions(vec![single, multi])
    }

    #[test]
    fn test_cursor_wraps_around_choices() {
        let mut app = sample_app();
        app.start_quiz();
        app.select_previous_option();
        assert_eq!(app.cursor(), 1);
        app.select_next_option();
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_toggle_refuses_more_than_max_selections() {
        let mut app = sample_app();
        app.start_quiz();

        app.toggle_option();
        assert!(app.is_picked(1));

        app.select_next_option();
        app.toggle_option();
        assert!(!app.is_picked(2));
        assert_eq!(app.status_message(), Some("Select at most 1 choice"));

        // unpicking frees the slot
        app.select_previous_option();
        app.toggle_option();
        assert!(!app.is_picked(1));
        assert_eq!(app.status_message(), None);
    }

    #[test]
    fn test_limit_message_uses_plural_above_one() {
        let mut app = sample_app();
        app.start_quiz();
        app.submit_answer();

        // multi allows two picks
        for _ in 0..3 {
            app.toggle_option();
            app.select_next_option();
        }
        assert!(!app.is_picked(3));
        assert_eq!(app.status_message(), Some("Select at most 2 choices"));
    }

    #[test]
    fn test_full_run_scores_points() {
        let mut app = sample_app();
        app.start_quiz();

        // single: pick "b"
        app.select_next_option();
        app.toggle_option();
        app.submit_answer();
        assert_eq!(app.current_question_number(), 2);

        // multi: pick "a" only
        app.toggle_option();
        app.submit_answer();

        assert_eq!(app.state, AppState::Result);
        assert_eq!(app.earned(), &[2, 0]);
        assert_eq!(app.calculate_score(), 2);
        assert_eq!(app.total_points(), 5);
        assert_eq!(app.answers()[1], Some(vec![1]));
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut app = sample_app();
        app.start_quiz();
        app.submit_answer();
        app.restart();

        assert_eq!(app.state, AppState::Welcome);
        assert_eq!(app.current_question_number(), 1);
        assert!(app.answers().iter().all(Option::is_none));
        assert_eq!(app.calculate_score(), 0);
    }

    #[test]
    fn test_empty_quiz_goes_straight_to_results() {
        let mut app = App::with_questions(Vec::new());
        app.start_quiz();
        assert_eq!(app.state, AppState::Result);
        assert!(app.current_question().is_none());
    }
}
