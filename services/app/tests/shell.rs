use app_lib::bootstrap::{build_collaborators, build_shell};
use app_lib::config::Config;
use app_lib::shell::Shell;
use informes_core::FormStatus;

fn memory_shell(locale: &'static str) -> Shell {
    let config = Config::from_lookup(|key| match key {
        "APP_LOCALE" => Some(locale.to_string()),
        "DEMO_EMAIL" => Some("demo@informes.test".to_string()),
        "DEMO_PASSWORD" => Some("demo1234".to_string()),
        _ => None,
    })
    .unwrap();
    let collaborators = build_collaborators(&config).unwrap();
    build_shell(&config, collaborators)
}

async fn run_script(shell: &mut Shell, script: &str) -> String {
    let mut output = Vec::new();
    shell.run(script.as_bytes(), &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn login_then_save_a_report() {
    let mut shell = memory_shell("es");
    let script = "\
login email demo@informes.test
login password demo1234
login submit
wait
informe curso Programación
informe año 2025
informe semestre Segundo
informe comentarios Clase de estructuras de datos
informe submit
wait
quit
";
    let out = run_script(&mut shell, script).await;

    assert!(out.contains("********"), "password must be masked");
    assert!(!out.contains("demo1234"));
    assert!(out.contains("(toast) Login exitoso"));
    assert!(out.contains("-- screen: log_success"));
    assert!(out.contains("Guardando informe..."));
    assert!(out.contains("Informe guardado exitosamente!"));
    assert!(out.contains("(toast) Informe guardado"));

    assert_eq!(shell.login.form().status(), &FormStatus::Succeeded);
    assert_eq!(shell.informes.form().status(), &FormStatus::Succeeded);
    assert_eq!(shell.informes.form().values().course, "");
}

#[tokio::test]
async fn report_before_login_asks_for_a_session() {
    let mut shell = memory_shell("es");
    let script = "\
informe submit
informe curso Programación
informe año 2025
informe semestre Segundo
informe submit
";
    let out = run_script(&mut shell, script).await;

    assert!(out.contains("Error: Los campos con * son obligatorios"));
    assert!(out.contains("(toast (long)) Error: Debe iniciar sesión para guardar informes"));
    assert!(matches!(shell.informes.form().status(), FormStatus::Failed(_)));
}

#[tokio::test]
async fn wrong_password_in_english() {
    let mut shell = memory_shell("en");
    let script = "\
login email demo@informes.test
login password nope123
login submit
";
    // End of input waits for the submission in flight.
    let out = run_script(&mut shell, script).await;

    assert!(out.contains("(toast (long)) Error: Wrong email or password"));
    assert!(!out.contains("-- screen: log_success"));
    assert_eq!(
        shell.login.form().status(),
        &FormStatus::Failed("Error: Wrong email or password".to_string())
    );
}

#[tokio::test]
async fn bad_lines_are_reported_and_skipped() {
    let mut shell = memory_shell("es");
    let out = run_script(&mut shell, "dance\ninforme nota 7\n\nlogin register\nback\n").await;

    assert!(out.contains("unknown command 'dance'"));
    assert!(out.contains("unknown informe field 'nota'"));
    assert!(out.contains("-- screen: register"));
    assert!(out.contains("-- screen: login"));
}
