//! Multiplication quiz on the headless backend.
//!
//! A window with ten digit buttons, an answer box and a "Check answer"
//! button. A scripted user on a second thread clicks through two rounds
//! while the main thread runs the message loop, then closes the window.
//!
//! Run with: cargo run -p tinygui --example quiz

use std::sync::Arc;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tinygui::prelude::*;
use tinygui::{HeadlessBackend, NativeHandle, WidgetTreeDebug};

const DIGITS: usize = 10;

/// Pseudo-random task source.
struct Tasks(AtomicU64);

impl Tasks {
    fn new() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0x2545_F491, |elapsed| elapsed.as_nanos() as u64);
        Self(AtomicU64::new(seed | 1))
    }

    /// Put a new task on `label` and return its solution.
    fn next(&self, label: &Label) -> GuiResult<i32> {
        let mut x = self.0.load(Ordering::Relaxed);
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0.store(x, Ordering::Relaxed);

        let (a, b) = ((x % 13) as i32, ((x >> 8) % 13) as i32);
        label.set_text(&format!("{a} MULTIPLY BY {b} EQUALS"))?;
        Ok(a * b)
    }
}

/// Widgets the check button's callback works on.
struct CheckContext {
    header: Arc<Label>,
    task: Arc<Label>,
    answer_box: Arc<TextBox>,
    answer: Arc<AtomicI32>,
    tasks: Arc<Tasks>,
}

fn check_answer(button: &Button, context: &CheckContext) -> GuiResult<()> {
    let typed = context.answer_box.text().trim().parse::<i32>().ok();
    let correct = typed == Some(context.answer.load(Ordering::SeqCst));
    context.header.set_text(if correct { "GOOD JOB!" } else { "WRONG ANSWER!" })?;
    tracing::info!(?typed, correct, "answer checked");

    button.set_enabled(false)?;
    thread::sleep(Duration::from_millis(300));
    context.header.set_text("Now can you calculate this?")?;
    button.set_enabled(true)?;

    context.answer_box.set_text("")?;
    let solution = context.tasks.next(&context.task)?;
    context.answer.store(solution, Ordering::SeqCst);
    Ok(())
}

struct Quiz {
    window: Arc<Window>,
    header: Arc<Label>,
    digits: Vec<Arc<Button>>,
    check: Arc<Button>,
    answer: Arc<AtomicI32>,
}

fn build(toolkit: &Toolkit) -> GuiResult<Quiz> {
    let window = Window::new(toolkit, "Learn the Multiplication Table!", Rect::new(0, 0, 440, 200));
    window.set_resizable(false)?;
    window.set_maximizable(false)?;

    let header = Label::new(toolkit, "Can you calculate this?", Rect::new(10, 10, 400, 20));
    let task = Label::new(toolkit, "", Rect::new(10, 35, 220, 20));
    let answer_box = TextBox::new(toolkit, "", Rect::new(240, 32, 102, 25), false);
    answer_box.set_number_only(true)?;
    let check = Button::new(toolkit, "Check answer", Rect::new(10, 110, 400, 25));

    let tasks = Arc::new(Tasks::new());
    let answer = Arc::new(AtomicI32::new(tasks.next(&task)?));

    check.set_on_click(
        |button, context, _| {
            if let Some(context) = context.get::<CheckContext>() {
                if let Err(err) = check_answer(button, context) {
                    tracing::warn!(error = %err, "checking the answer failed");
                }
            }
        },
        EventContext::new(CheckContext {
            header: header.clone(),
            task: task.clone(),
            answer_box: answer_box.clone(),
            answer: answer.clone(),
            tasks,
        }),
        SyncMode::Async,
    )?;

    let mut digits = Vec::with_capacity(DIGITS);
    for digit in 0..DIGITS {
        let button = Button::new(toolkit, &digit.to_string(), Rect::new(10 + digit as i32 * 40, 60, 40, 40));
        button.set_on_click(
            |button, context, _| {
                if let Some(answer_box) = context.get::<Arc<TextBox>>() {
                    let text = format!("{}{}", answer_box.text(), button.text());
                    if let Err(err) = answer_box.set_text(&text) {
                        tracing::warn!(error = %err, "updating the answer failed");
                    }
                }
            },
            EventContext::new(answer_box.clone()),
            SyncMode::Sync,
        )?;
        window.add_child(button.clone())?;
        digits.push(button);
    }

    window.add_child(header.clone())?;
    window.add_child(task)?;
    window.add_child(answer_box)?;
    window.add_child(check.clone())?;

    Ok(Quiz {
        window,
        header,
        digits,
        check,
        answer,
    })
}

fn handle_of(widget: &dyn Widget) -> GuiResult<NativeHandle> {
    let base = widget.widget_base();
    base.native_handle().ok_or(GuiError::Detached(base.id()))
}

/// Click the digits of `value`, then the check button, and wait for the
/// check to finish.
fn answer_round(toolkit: &Toolkit, backend: &HeadlessBackend, quiz: &Quiz, value: i32) -> GuiResult<()> {
    for digit in value.to_string().chars().filter_map(|c| c.to_digit(10)) {
        let handle = handle_of(quiz.digits[digit as usize].as_ref())?;
        backend.user_click(toolkit, handle, Point::new(20, 20))?;
    }
    backend.user_click(toolkit, handle_of(quiz.check.as_ref())?, Point::new(200, 12))?;

    // Let the loop deliver the clicks before waiting on the async check.
    thread::sleep(Duration::from_millis(100));
    println!("  header: {}", quiz.header.text());
    toolkit.executor().wait_idle(Duration::from_secs(5));
    Ok(())
}

fn main() -> GuiResult<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    let (toolkit, backend) = Toolkit::headless()?;
    let quiz = Arc::new(build(&toolkit)?);
    let window_handle = quiz.window.show()?;
    print!("{}", WidgetTreeDebug::new().show_text(true).format(quiz.window.as_ref()));

    let user = {
        let toolkit = toolkit.clone();
        let backend = backend.clone();
        let quiz = quiz.clone();
        thread::spawn(move || -> GuiResult<()> {
            let right = quiz.answer.load(Ordering::SeqCst);
            println!("round 1: answering {right}");
            answer_round(&toolkit, &backend, &quiz, right)?;

            let wrong = quiz.answer.load(Ordering::SeqCst) + 1;
            println!("round 2: answering {wrong}");
            answer_round(&toolkit, &backend, &quiz, wrong)?;

            backend.user_close(&toolkit, window_handle)
        })
    };

    let code = MessageLoop::new(&toolkit).run();
    match user.join() {
        Ok(result) => result?,
        Err(_) => tracing::error!("scripted user panicked"),
    }
    println!("message loop exited with {code}");
    Ok(())
}
