use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use matrix_client::{AnalysisRequest, Backend, ClientError};
use matrix_model::{AnalysisKind, AnalysisResult, PreviewHandle, RequestState, Verdict};
use matrix_submit::{Applied, Phase, SubmissionForm, SubmissionRunner, SubmitError};

/// In-memory backend that replays scripted replies and counts calls.
struct MockBackend {
    replies: Mutex<Vec<Result<Vec<u8>, ClientError>>>,
    calls: AtomicUsize,
}

impl MockBackend {
    fn replying(replies: Vec<Result<Vec<u8>, ClientError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
        }
    }

    fn ok(body: &str) -> Self {
        Self::replying(vec![Ok(body.as_bytes().to_vec())])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Backend for MockBackend {
    async fn analyze(&self, _request: &AnalysisRequest) -> matrix_client::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            Ok(b"{}".to_vec())
        } else {
            replies.remove(0)
        }
    }
}

const DEEPFAKE_BODY: &str = r#"{"Final Prediction": "Fake", "Confidence Score": 0.42}"#;

async fn ready_image(runner: &mut SubmissionRunner<MockBackend>) {
    runner
        .select_file(
            AnalysisKind::DeepfakeImage,
            "face.png",
            "image/png",
            vec![0x89, b'P', b'N', b'G'],
        )
        .await
        .unwrap();
    assert_eq!(runner.form().phase(), Phase::PreviewReady);
}

#[tokio::test]
async fn valid_image_reaches_succeeded() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    ready_image(&mut runner).await;
    assert!(runner.form().preview().unwrap().as_str().starts_with("data:image/png;base64,"));

    assert_eq!(runner.submit().await.unwrap(), Applied::Applied);
    assert_eq!(runner.form().request_state(), RequestState::Succeeded);
    assert_eq!(runner.backend().calls(), 1);

    let Some(Ok(AnalysisResult::Deepfake(result))) = runner.outcome() else {
        panic!("expected deepfake result");
    };
    assert_eq!(result.aggregate_verdict, Verdict::Fake);
}

#[tokio::test]
async fn backend_failure_reaches_failed() {
    let backend = MockBackend::replying(vec![Err(ClientError::NetworkFailure {
        status: Some(500),
        message: "model crashed".to_string(),
    })]);
    let mut runner = SubmissionRunner::new(backend);
    ready_image(&mut runner).await;

    runner.submit().await.unwrap();
    assert_eq!(runner.form().request_state(), RequestState::Failed);
    let err = runner.form().error().unwrap();
    assert!(matches!(err, SubmitError::NetworkFailure { status: Some(500), .. }));
    assert!(err.is_retryable());
    assert!(runner.form().result().is_none());
}

#[tokio::test]
async fn malformed_body_reaches_failed() {
    let mut runner = SubmissionRunner::new(MockBackend::ok("[1, 2, 3]"));
    ready_image(&mut runner).await;

    runner.submit().await.unwrap();
    assert_eq!(runner.form().phase(), Phase::Failed);
    assert!(matches!(
        runner.form().error(),
        Some(SubmitError::MalformedResponse(_))
    ));
}

#[tokio::test]
async fn mismatched_media_type_stays_idle() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    let err = runner
        .select_file(AnalysisKind::DeepfakeVideo, "clip.png", "image/png", vec![1])
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::InvalidFileType { .. }));
    assert_eq!(runner.form().request_state(), RequestState::Idle);
    assert!(runner.form().preview().is_none());
    assert_eq!(runner.backend().calls(), 0);
}

#[tokio::test]
async fn submit_from_idle_is_refused() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    assert_eq!(runner.submit().await.unwrap_err(), SubmitError::NoFileSelected);
    assert_eq!(runner.backend().calls(), 0);
}

#[tokio::test]
async fn double_submit_sends_one_request() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    ready_image(&mut runner).await;

    let pending = runner.form_mut().submit().unwrap();
    assert_eq!(runner.submit().await.unwrap_err(), SubmitError::AlreadyInFlight);
    assert_eq!(runner.form().request_state(), RequestState::InFlight);

    assert_eq!(runner.run(pending).await, Applied::Applied);
    assert_eq!(runner.backend().calls(), 1);
    assert_eq!(runner.form().request_state(), RequestState::Succeeded);
}

#[tokio::test]
async fn late_response_after_reset_is_discarded() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    ready_image(&mut runner).await;

    let pending = runner.form_mut().submit().unwrap();
    runner.reset();

    // The request still goes out; its outcome must not land.
    assert_eq!(runner.run(pending).await, Applied::Stale);
    assert_eq!(runner.backend().calls(), 1);
    assert_eq!(runner.form().request_state(), RequestState::Idle);
    assert!(runner.form().result().is_none());
    assert!(runner.form().submission().is_none());
    assert!(runner.outcome().is_none());
}

#[tokio::test]
async fn reselect_supersedes_in_flight_request() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    ready_image(&mut runner).await;
    let pending = runner.form_mut().submit().unwrap();

    runner
        .select_text(AnalysisKind::TextFactCheck, "Vaccines contain microchips")
        .await
        .unwrap();
    assert_eq!(runner.run(pending).await, Applied::Stale);
    assert_eq!(runner.form().phase(), Phase::PreviewReady);
    assert!(runner.form().result().is_none());
}

#[tokio::test]
async fn reset_clears_terminal_state() {
    let mut runner = SubmissionRunner::new(MockBackend::ok(DEEPFAKE_BODY));
    ready_image(&mut runner).await;
    runner.submit().await.unwrap();
    assert!(runner.form().result().is_some());

    runner.reset();
    let form = runner.form();
    assert_eq!(form.phase(), Phase::Idle);
    assert!(form.submission().is_none());
    assert!(form.preview().is_none());
    assert!(form.result().is_none());
    assert!(form.error().is_none());
    assert!(form.active_token().is_none());
}

/// Drives a fresh form into `target`.
fn form_in(target: Phase) -> SubmissionForm {
    let mut form = SubmissionForm::new();
    let preview = form
        .select_text(AnalysisKind::TextFactCheck, "The moon is made of cheese")
        .unwrap();
    if target == Phase::Validating {
        return form;
    }
    form.preview_ready(
        preview.token(),
        PreviewHandle::TextEcho("The moon is made of cheese".to_string()),
    );
    if target == Phase::PreviewReady {
        return form;
    }
    let dispatch = form.submit().unwrap();
    if target == Phase::Submitting {
        return form;
    }
    let outcome = match target {
        Phase::Failed => Err(SubmitError::MalformedResponse("truncated body".to_string())),
        _ => Ok(text_result()),
    };
    form.complete(dispatch.token(), outcome);
    form
}

fn text_result() -> AnalysisResult {
    let body = br#"{"detailed_analysis": {"is_fake": true}}"#;
    matrix_analysis::normalize(body, AnalysisKind::TextFactCheck).unwrap()
}

#[test]
fn reset_clears_every_phase() {
    for phase in [
        Phase::Validating,
        Phase::PreviewReady,
        Phase::Submitting,
        Phase::Succeeded,
        Phase::Failed,
    ] {
        let mut form = form_in(phase);
        assert_eq!(form.phase(), phase);
        let stale_token = form.active_token().unwrap();

        form.reset();

        assert_eq!(form.phase(), Phase::Idle, "from {phase}");
        assert_eq!(form.request_state(), RequestState::Idle, "from {phase}");
        assert!(form.submission().is_none(), "submission kept from {phase}");
        assert!(form.preview().is_none(), "preview kept from {phase}");
        assert!(form.result().is_none(), "result kept from {phase}");
        assert!(form.error().is_none(), "error kept from {phase}");
        assert!(form.active_token().is_none(), "token kept from {phase}");
        assert_eq!(
            form.preview_ready(stale_token, PreviewHandle::TextEcho(String::new())),
            Applied::Stale,
            "from {phase}"
        );
    }
}

#[tokio::test]
async fn url_rejection_surfaces_backend_message() {
    let body = r#"{"status": "error", "content": "Unable to fetch the news from the url. Please try a different link"}"#;
    let mut runner = SubmissionRunner::new(MockBackend::ok(body));
    runner
        .select_text(AnalysisKind::UrlFactCheck, "https://news.example/story")
        .await
        .unwrap();
    runner.submit().await.unwrap();

    let Some(Err(err)) = runner.outcome() else {
        panic!("expected failure");
    };
    assert!(err.user_message().starts_with("Unable to fetch the news"));
}
