//! Integration tests for triage-wizard

use std::time::Duration;

use triage_wizard::{
    ChatClient, Direction, Immediate, NETWORK_ERROR_MESSAGE, NONE_OF_THESE, Pacing, PayloadStyle,
    PresentMode, Question, QuestionSet, ReplyPresenter, ReplyResult, Selection, Session,
    SubmitOutcome, TestTransport,
};

fn six_questions() -> QuestionSet {
    QuestionSet::new(vec![
        Question::single_select("q1", "Has this happened more than once?", ["Yes", "No"]),
        Question::single_select("q2", "Was it done by a manager?", ["Yes", "No"]),
        Question::single_select("q3", "Did anyone else witness it?", ["Yes", "No"]),
        Question::single_select("q4", "Have you reported it already?", ["Yes", "No"]),
        Question::multi_select(
            "q5",
            "Which of these describe it?",
            ["Threats", "Insults", "Exclusion", NONE_OF_THESE],
        ),
        Question::free_text("q6", "Describe what happened."),
    ])
    .unwrap()
}

fn session(transport: TestTransport, mode: PresentMode) -> Session<TestTransport> {
    Session::new(
        six_questions(),
        ChatClient::new(transport),
        ReplyPresenter::new(mode),
        PayloadStyle::structured(),
    )
}

/// Answer all six questions the way a user clicking through would.
async fn answer_all(session: &mut Session<TestTransport>) {
    let wizard = session.wizard_mut();
    for choice in ["Yes", "No", "Yes", "No"] {
        assert!(wizard.choose(choice));
        wizard
            .navigate(Direction::Forward, &mut Immediate)
            .await
            .unwrap();
    }
    assert_eq!(wizard.toggle("Threats"), Some(true));
    assert_eq!(wizard.toggle(NONE_OF_THESE), Some(true));
    wizard
        .navigate(Direction::Forward, &mut Immediate)
        .await
        .unwrap();
    assert!(wizard.set_text("details"));
}

#[tokio::test]
async fn test_submit_reply() {
    let transport = TestTransport::new().with_reply("ok");
    let mut session = session(transport.clone(), PresentMode::Immediate);
    answer_all(&mut session).await;

    let outcome = session.submit().await;
    assert_eq!(outcome, SubmitOutcome::Replied(ReplyResult::Reply("ok".into())));
    assert_eq!(session.presenter().text(), "ok");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].history.is_empty());
    let message = &requests[0].message;
    let dump = &message[message.find('{').unwrap()..];
    let answers: serde_json::Value = serde_json::from_str(dump).unwrap();
    assert_eq!(
        answers,
        serde_json::json!({
            "Has this happened more than once?": "Yes",
            "Was it done by a manager?": "No",
            "Did anyone else witness it?": "Yes",
            "Have you reported it already?": "No",
            "Which of these describe it?": [NONE_OF_THESE],
            "Describe what happened.": "details",
        })
    );
}

#[tokio::test]
async fn test_submit_backend_error() {
    let transport = TestTransport::new().with_error("bad input");
    let mut session = session(transport, PresentMode::Immediate);
    answer_all(&mut session).await;

    let outcome = session.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Replied(ReplyResult::Error("bad input".into()))
    );
    assert_eq!(session.presenter().text(), "Error: bad input");
}

#[tokio::test]
async fn test_submit_network_failure() {
    let transport = TestTransport::new().with_failure("connection refused");
    let mut session = session(transport.clone(), PresentMode::Immediate);
    answer_all(&mut session).await;

    assert_eq!(session.submit().await, SubmitOutcome::Failed);
    assert_eq!(session.presenter().text(), NETWORK_ERROR_MESSAGE);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_incomplete_submit_jumps_to_gap() {
    let transport = TestTransport::new().with_reply("ok");
    let mut session = session(transport.clone(), PresentMode::Immediate);
    answer_all(&mut session).await;

    // Take back the answer to question five.
    let wizard = session.wizard_mut();
    assert!(wizard.jump_to(4));
    assert_eq!(wizard.toggle(NONE_OF_THESE), Some(false));

    assert_eq!(
        session.submit().await,
        SubmitOutcome::Incomplete { index: 4 }
    );
    assert_eq!(session.wizard().cursor(), 4);
    assert_eq!(transport.request_count(), 0);
    assert_eq!(session.presenter().text(), "");
}

#[tokio::test]
async fn test_resubmit_after_reset() {
    let transport = TestTransport::new().with_error("bad input").with_reply("ok");
    let mut session = session(transport.clone(), PresentMode::Immediate);
    answer_all(&mut session).await;
    session.submit().await;

    session.reset();
    assert_eq!(session.wizard().cursor(), 0);
    assert_eq!(
        session.submit().await,
        SubmitOutcome::Incomplete { index: 0 }
    );

    answer_all(&mut session).await;
    session.submit().await;
    assert_eq!(session.presenter().text(), "ok");
    assert_eq!(transport.request_count(), 2);
}

#[tokio::test]
async fn test_answers_survive_navigation() {
    let mut session = session(TestTransport::new(), PresentMode::Immediate);
    answer_all(&mut session).await;

    let wizard = session.wizard_mut();
    while wizard
        .navigate(Direction::Backward, &mut Immediate)
        .await
        .unwrap()
        .is_some()
    {}
    assert_eq!(wizard.cursor(), 0);
    assert_eq!(wizard.draft().as_text(), Some("Yes"));

    wizard.jump_to(4);
    let selection: Selection = [NONE_OF_THESE].into_iter().collect();
    assert_eq!(wizard.draft().as_selection(), Some(&selection));
}

#[tokio::test(start_paused = true)]
async fn test_typewriter_reply() {
    let pacing = Pacing {
        char_delay: Duration::from_millis(10),
        pause_delay: Duration::from_millis(100),
    };
    let transport = TestTransport::new().with_reply("Likely bullying.");
    let mut session = session(transport, PresentMode::Typewriter(pacing));
    answer_all(&mut session).await;

    let mut display = session.presenter().subscribe();
    session.submit().await;
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert_eq!(session.presenter().text(), "Lik");

    session.reveal_finished().await;
    assert_eq!(session.presenter().text(), "Likely bullying.");
    assert_eq!(*display.borrow_and_update(), "Likely bullying.");
}
