mod support;

use informes_core::flows::{authenticate, finish_sign_in, open_register, prepare_sign_in, Prepared};
use informes_core::{
    routes, CollaboratorError, Credentials, ErrorCode, FormState, FormStatus, Locale, LoginField,
    Messages, NavOptions, NoticeDuration, SubmitError,
};
use support::{FakeIdentity, RecordingNavigator, RecordingNotifier};

fn es() -> &'static Messages {
    Messages::for_locale(Locale::Es)
}

fn filled_form(email: &str, password: &str) -> FormState<Credentials> {
    let mut form = FormState::new();
    form.set_field(LoginField::Email, email);
    form.set_field(LoginField::Password, password);
    form
}

#[tokio::test]
async fn invalid_fields_never_reach_the_identity_service() {
    let identity = FakeIdentity::succeeding("uid-1", "ana@example.com");
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("ana", "123");

    let result = authenticate(&mut form, &identity, &navigator, &notifier, es()).await;

    assert!(matches!(result, Err(SubmitError::Validation(_))));
    assert_eq!(identity.call_count(), 0);
    assert_eq!(form.status(), &FormStatus::Idle);
    assert_eq!(form.error(LoginField::Email), es().email_invalid);
    assert_eq!(form.error(LoginField::Password), es().password_too_short(6));
    assert!(navigator.transitions.lock().unwrap().is_empty());
}

#[tokio::test]
async fn only_the_failing_field_gets_an_error() {
    let identity = FakeIdentity::succeeding("uid-1", "ana@example.com");
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("", "secreto123");

    let _ = authenticate(&mut form, &identity, &navigator, &notifier, es()).await;

    assert_eq!(form.error(LoginField::Email), es().email_required);
    assert_eq!(form.error(LoginField::Password), "");
}

#[tokio::test]
async fn success_navigates_away_and_drops_login_from_history() {
    let identity = FakeIdentity::succeeding("uid-1", "ana@example.com");
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("ana@example.com", "secreto123");

    let session = authenticate(&mut form, &identity, &navigator, &notifier, es())
        .await
        .expect("sign-in should succeed");

    assert_eq!(session.uid, "uid-1");
    assert_eq!(form.status(), &FormStatus::Succeeded);
    assert_eq!(form.message(), "Login exitoso");
    assert_eq!(form.values(), &Credentials::default());
    assert_eq!(
        identity.calls.lock().unwrap()[0],
        ("ana@example.com".to_string(), "secreto123".to_string())
    );
    assert_eq!(
        navigator.transitions.lock().unwrap().as_slice(),
        &[(
            routes::LOG_SUCCESS.to_string(),
            NavOptions::pop_up_to(routes::LOGIN, true)
        )]
    );
    assert_eq!(
        notifier.notices.lock().unwrap().as_slice(),
        &[("Login exitoso".to_string(), NoticeDuration::Short)]
    );
}

#[tokio::test]
async fn network_failure_yields_connectivity_message_and_keeps_fields() {
    let identity = FakeIdentity::failing(CollaboratorError::unknown(
        "A network error (such as timeout, interrupted connection or unreachable host) has occurred.",
    ));
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("ana@example.com", "secreto123");

    let result = authenticate(&mut form, &identity, &navigator, &notifier, es()).await;

    assert!(matches!(result, Err(SubmitError::Transport(_))));
    assert_eq!(form.status(), &FormStatus::Failed(es().network.to_string()));
    assert_eq!(form.value(LoginField::Email), "ana@example.com");
    assert_eq!(form.value(LoginField::Password), "secreto123");
    assert!(navigator.transitions.lock().unwrap().is_empty());
    assert_eq!(
        notifier.notices.lock().unwrap()[0],
        (es().network.to_string(), NoticeDuration::Long)
    );
}

#[tokio::test]
async fn rejected_credentials_can_be_retried() {
    let identity = FakeIdentity::failing(CollaboratorError::new(
        ErrorCode::InvalidCredentials,
        "INVALID_LOGIN_CREDENTIALS",
    ));
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("ana@example.com", "secreto123");

    let first = authenticate(&mut form, &identity, &navigator, &notifier, es()).await;
    assert!(matches!(first, Err(SubmitError::Credentials { .. })));
    assert_eq!(form.message(), es().invalid_credentials);

    let second = authenticate(&mut form, &identity, &navigator, &notifier, es()).await;
    assert!(second.is_err());
    assert_eq!(identity.call_count(), 2);
}

#[test]
fn second_submission_while_in_flight_is_rejected() {
    let mut form = filled_form("ana@example.com", "secreto123");

    let first = prepare_sign_in(&mut form, es());
    assert!(matches!(first, Prepared::Ready(_)));
    assert!(form.is_submitting());

    let snapshot = form.clone();
    assert!(matches!(prepare_sign_in(&mut form, es()), Prepared::Busy));
    assert_eq!(form, snapshot);
}

#[test]
fn edits_during_flight_do_not_disturb_completion() {
    let navigator = RecordingNavigator::default();
    let notifier = RecordingNotifier::default();
    let mut form = filled_form("ana@example.com", "secreto123");

    let Prepared::Ready(request) = prepare_sign_in(&mut form, es()) else {
        panic!("expected a request");
    };
    assert_eq!(request.email, "ana@example.com");

    form.set_field(LoginField::Password, "otra-clave");
    assert!(form.is_submitting());

    let result = finish_sign_in(
        &mut form,
        Err(CollaboratorError::new(ErrorCode::Network, "offline")),
        es(),
        &navigator,
        &notifier,
    );
    assert!(result.is_err());
    assert_eq!(form.value(LoginField::Password), "otra-clave");
}

#[test]
fn register_link_navigates_without_popping() {
    let navigator = RecordingNavigator::default();
    open_register(&navigator);
    assert_eq!(
        navigator.transitions.lock().unwrap().as_slice(),
        &[(routes::REGISTER.to_string(), NavOptions::default())]
    );
}
