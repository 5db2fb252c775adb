//! 交互式应用 - 编排层
//!
//! 终端版的提交表单 + 结果区域：循环读表单、提交、整体打印
//! 渲染文档、逐卡片跑测验交互。提交在途期间流程在 await 上挂起，
//! 不会接受第二次提交。

use anyhow::Result;
use console::{style, Term};
use tracing::info;

use crate::config::Config;
use crate::models::OutputKind;
use crate::services::quiz::{OptionMark, QuizCard};
use crate::services::renderer::{RenderedDocument, SectionBody};
use crate::workflow::{FormInput, RequestController, SubmitOutcome};

/// 应用主结构
pub struct App {
    controller: RequestController,
    term: Term,
    verbose_logging: bool,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        Ok(Self {
            controller: RequestController::new(&config),
            term: Term::stdout(),
            verbose_logging: config.verbose_logging,
        })
    }

    /// 运行交互主循环
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let form = match self.read_form()? {
                Some(form) => form,
                None => break,
            };

            // 在途状态提示；流程在 await 上挂起，天然不接受第二次提交
            self.term
                .write_line(&format!("{}", style("Working...").dim()))?;
            self.term
                .write_line(&format!("{}", style("Sending request…").dim()))?;

            match self.controller.submit(&form).await {
                SubmitOutcome::Rendered(mut document) => {
                    if self.verbose_logging {
                        let keys: Vec<&str> =
                            document.sections.iter().map(|s| s.key.as_str()).collect();
                        info!("📋 本次渲染的输出段: {:?}", keys);
                    }
                    self.print_document(&document)?;
                    self.run_quiz(&mut document)?;
                }
                other => {
                    if let Some(message) = other.status_message() {
                        self.term
                            .write_line(&format!("{}", style(message).yellow()))?;
                    }
                }
            }

            self.term.write_line("")?;
        }

        info!("👋 程序退出");
        Ok(())
    }

    // ========== 表单输入 ==========

    /// 读取一次表单输入；URL 处输入 quit 退出，返回 None
    fn read_form(&self) -> Result<Option<FormInput>> {
        self.term.write_line(&format!(
            "{}",
            style("Paste a YouTube URL (or 'quit' to exit):").bold()
        ))?;
        let raw_url = self.term.read_line()?;
        if raw_url.trim().eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        let all_kinds = OutputKind::ALL
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        self.term
            .write_line(&format!("Outputs (comma separated: {}):", all_kinds))?;
        let raw_outputs = self.term.read_line()?;
        let checked_outputs: Vec<OutputKind> = raw_outputs
            .split(',')
            .filter_map(OutputKind::parse)
            .collect();

        // 题数控件只在勾选 quiz 时出现
        let raw_question_count = if checked_outputs.contains(&OutputKind::Quiz) {
            self.term.write_line("Number of quiz questions:")?;
            let value = self.term.read_line()?;
            let value = value.trim();
            if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            }
        } else {
            None
        };

        Ok(Some(FormInput {
            raw_url,
            checked_outputs,
            raw_question_count,
        }))
    }

    // ========== 结果区域 ==========

    /// 整体打印一份渲染文档（替换式，不做增量更新）
    fn print_document(&self, document: &RenderedDocument) -> Result<()> {
        self.term.write_line("")?;
        self.term
            .write_line(&format!("{}", style(&document.header).bold()))?;

        for section in &document.sections {
            self.term.write_line("")?;
            self.term
                .write_line(&format!("{}", style(&section.label).cyan().bold()))?;

            match &section.body {
                SectionBody::Markup(markup) => {
                    // 信任服务端的 markup，原样输出
                    self.term.write_line(markup)?;
                }
                SectionBody::Structured(text) => {
                    self.term.write_line(&format!("{}", style(text).dim()))?;
                }
                SectionBody::Placeholder(text) => {
                    self.term.write_line(&format!("{}", style(*text).dim()))?;
                }
                SectionBody::Quiz(cards) => {
                    for card in cards {
                        self.print_card(card)?;
                    }
                }
            }
        }

        self.term.write_line("")?;
        Ok(())
    }

    fn print_card(&self, card: &QuizCard) -> Result<()> {
        self.term.write_line(&format!(
            "{}",
            style(format!("{}. {}", card.number, card.question)).bold()
        ))?;

        for (index, option) in card.options.iter().enumerate() {
            let label = format!("  [{}] {}", index + 1, option.text);
            let line = match option.mark {
                OptionMark::Correct => {
                    format!("{} {}", style(label).green(), style("✓").green().bold())
                }
                OptionMark::Wrong => {
                    format!("{} {}", style(label).red(), style("✗").red().bold())
                }
                OptionMark::None if option.disabled => format!("{}", style(label).dim()),
                OptionMark::None => label,
            };
            self.term.write_line(&line)?;
        }

        if card.explanation_visible && !card.explanation.is_empty() {
            self.term.write_line(&format!(
                "  {} {}",
                style("Explanation:").bold(),
                card.explanation
            ))?;
        }

        Ok(())
    }

    // ========== 测验交互 ==========

    /// 逐卡片跑测验交互；每张卡片只接受一次作答
    fn run_quiz(&self, document: &mut RenderedDocument) -> Result<()> {
        if !document.has_quiz() {
            return Ok(());
        }

        self.term
            .write_line(&format!("{}", style("— Quiz time —").bold()))?;

        for card in document.quiz_cards_mut() {
            self.term.write_line("")?;
            loop {
                self.term.write_line(&format!(
                    "Question {} — your answer (1-{}):",
                    card.number,
                    card.option_count()
                ))?;
                let input = self.term.read_line()?;

                let selected = match input.trim().parse::<usize>() {
                    Ok(n) => n,
                    Err(_) => {
                        self.term
                            .write_line(&format!("{}", style("Pick an option number.").dim()))?;
                        continue;
                    }
                };

                match card.answer(selected) {
                    Some(verdict) => {
                        self.print_card(card)?;
                        if verdict.correct {
                            self.term
                                .write_line(&format!("{}", style("Correct!").green().bold()))?;
                        } else {
                            self.term
                                .write_line(&format!("{}", style("Not quite.").red().bold()))?;
                        }
                        break;
                    }
                    None => {
                        // 卡片已作答时不会走到这里（循环作答一次就 break），
                        // 这里只剩序号越界的情况
                        self.term
                            .write_line(&format!("{}", style("Pick an option number.").dim()))?;
                    }
                }
            }
        }

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - summarize 交互客户端");
    info!("🌐 后端地址: {}", config.api_base_url);
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}
