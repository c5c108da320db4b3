//! Interactive practice session.

use super::CommandContext;
use std::io::{BufRead, Write};
use studypal_core::{due_cards, Grade, ReviewSession, Sm2};

const RULE: &str = "------------------------------------------------------------";

enum GradeInput {
    Grade(Grade),
    Quit,
}

/// Walk through today's due cards, grading each one.
///
/// The deck is saved after every grade, so quitting early (or hitting end of
/// input) keeps the reviews done so far.
pub fn practice<R: BufRead, W: Write>(
    ctx: &CommandContext,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<ReviewSession> {
    let mut deck = ctx.store.load()?;
    let queue: Vec<i64> = due_cards(&deck, ctx.today).map(|c| c.id).collect();
    let mut session = ReviewSession::new();

    if queue.is_empty() {
        writeln!(out, "No cards due today.")?;
        return Ok(session);
    }

    let algorithm = Sm2::default();
    writeln!(out, "Due today: {} cards\n(Enter 'q' anytime to stop)\n", queue.len())?;

    for id in queue {
        let card = deck.get(id)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "#{} Q: {}", card.id, card.question)?;
        write!(out, "Show answer (Enter)...")?;
        out.flush()?;

        match read_line(input)? {
            Some(line) if line.trim().eq_ignore_ascii_case("q") => {
                return finish_early(out, session);
            }
            Some(_) => {}
            None => return finish_early(out, session),
        }
        writeln!(out, "A: {}", card.answer)?;

        let grade = match prompt_grade(input, out)? {
            GradeInput::Grade(grade) => grade,
            GradeInput::Quit => return finish_early(out, session),
        };

        let result = deck.review(id, grade, ctx.today, &algorithm)?;
        ctx.store.save(&deck)?;
        session.record(grade);

        tracing::debug!(
            "Card {} graded {}: interval {} -> {}, ease {:.2} -> {:.2}",
            id,
            grade,
            result.interval_before,
            result.card.interval,
            result.ease_before,
            result.card.ease_factor
        );
        writeln!(out, "Next review: {}", result.next_due())?;
    }

    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Session done. Accuracy (>=3): {:.1}% • Reviewed: {}",
        session.accuracy(),
        session.reviewed
    )?;
    tracing::info!(
        "Practice finished: {} reviewed, {} successful",
        session.reviewed,
        session.successful
    );
    Ok(session)
}

fn prompt_grade<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<GradeInput> {
    loop {
        write!(out, "Grade 0..5: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(GradeInput::Quit);
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(GradeInput::Quit);
        }
        if let Some(grade) = line.parse::<i64>().ok().and_then(|g| Grade::new(g).ok()) {
            return Ok(GradeInput::Grade(grade));
        }
        writeln!(out, "Please enter a number 0..5 or 'q'.")?;
    }
}

fn finish_early<W: Write>(out: &mut W, session: ReviewSession) -> anyhow::Result<ReviewSession> {
    writeln!(out, "\nSaved. Bye!")?;
    tracing::info!("Practice stopped after {} reviews", session.reviewed);
    Ok(session)
}

/// Next input line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
