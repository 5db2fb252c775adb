//! 测验卡片 - 每道题一个独立的有限状态机
//!
//! 状态只有两个：`Unanswered → Answered`，一旦作答永不回退。
//! 作答后所有选项控件被禁用，这是防止重复触发的手段。
//! 卡片之间互不影响，也没有顺序依赖。

use crate::models::QuizQuestion;

/// 卡片状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Unanswered,
    Answered,
}

/// 选项上的视觉标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    None,
    Correct,
    Wrong,
}

/// 单个选项控件
#[derive(Debug, Clone)]
pub struct QuizOption {
    pub text: String,
    /// 隐藏的正确性标志：1-based 位置 == answer
    pub is_correct: bool,
    pub mark: OptionMark,
    pub disabled: bool,
}

/// 一次作答的结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerVerdict {
    /// 用户选择的 1-based 选项序号
    pub selected: usize,
    pub correct: bool,
    /// 答错时被揭示的正确选项（1-based）；answer 越界时为 None
    pub revealed: Option<usize>,
}

/// 测验卡片
///
/// 渲染时从 [`QuizQuestion`] 构建，身份就是它的 1-based 展示序号。
/// 作答转移以显式的选项序号为参数，不做任何全局查找。
#[derive(Debug, Clone)]
pub struct QuizCard {
    /// 1-based 展示序号
    pub number: usize,
    pub question: String,
    pub options: Vec<QuizOption>,
    pub explanation: String,
    pub explanation_visible: bool,
    state: WidgetState,
}

impl QuizCard {
    /// 从一道题构建卡片，`number` 为 1-based 展示序号
    pub fn from_question(number: usize, question: &QuizQuestion) -> Self {
        let options = question
            .options
            .iter()
            .enumerate()
            .map(|(index, text)| QuizOption {
                text: text.clone(),
                is_correct: question.is_correct_option(index + 1),
                mark: OptionMark::None,
                disabled: false,
            })
            .collect();

        Self {
            number,
            question: question.question.clone(),
            options,
            explanation: question.explanation.clone(),
            explanation_visible: false,
            state: WidgetState::Unanswered,
        }
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// 作答转移：`Unanswered → Answered`
    ///
    /// `selected` 为 1-based 选项序号。返回 None 表示转移没有发生：
    /// 卡片已作答（控件已禁用）或序号不在选项范围内。
    ///
    /// 转移发生时：
    /// - 本卡所有选项控件被禁用（不可逆）
    /// - 选中项标记 correct 或 wrong
    /// - 答错时额外标记真正的正确选项，保证正确答案总是被揭示
    /// - 解析块变为可见
    pub fn answer(&mut self, selected: usize) -> Option<AnswerVerdict> {
        if self.state == WidgetState::Answered {
            return None;
        }
        if selected == 0 || selected > self.options.len() {
            return None;
        }

        self.state = WidgetState::Answered;
        for option in &mut self.options {
            option.disabled = true;
        }

        let index = selected - 1;
        let correct = self.options[index].is_correct;
        let mut revealed = None;

        if correct {
            self.options[index].mark = OptionMark::Correct;
        } else {
            self.options[index].mark = OptionMark::Wrong;
            if let Some(correct_index) = self.options.iter().position(|o| o.is_correct) {
                self.options[correct_index].mark = OptionMark::Correct;
                revealed = Some(correct_index + 1);
            }
        }

        self.explanation_visible = true;

        Some(AnswerVerdict {
            selected,
            correct,
            revealed,
        })
    }
}
