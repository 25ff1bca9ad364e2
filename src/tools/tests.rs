use super::{CTF_ESTIMATE_PROGRAM, CtfEstimateTask, EllipseCtf, ToolCommand, ToolError};

fn ellipse() -> EllipseCtf {
    EllipseCtf {
        sampling_rate: 1.4,
        voltage: 300.0,
        spherical_aberration: 2.7,
        defocus_u: 15000.0,
        defocus_v: 14500.5,
    }
}

#[test]
fn option_emits_flag_then_value() {
    let command = ToolCommand::new("tool").arg("-x").option("size", 3);
    assert_eq!(command.args(), ["-x", "--size", "3"]);
    assert_eq!(command.to_string(), "tool -x --size 3");
}

#[test]
fn ctf_task_lists_every_flag_in_order() {
    let task = CtfEstimateTask::new(&ellipse(), 45.0, "run/psd/mic_001.psd", 7);

    assert_eq!(task.row(), 7);
    assert_eq!(task.command().program(), CTF_ESTIMATE_PROGRAM);
    assert_eq!(
        task.command().to_string(),
        "xmipp_ctf_estimate_from_psd --sampling_rate 1.4 --kV 300 --Cs 2.7 \
         --defocusU 15000 --defocusV 14500.5 --azimuthal_angle 45 --psd run/psd/mic_001.psd"
    );
}

#[test]
fn missing_program_is_a_spawn_error() {
    let err = ToolCommand::new("definitely-not-an-installed-tool-4f2a")
        .run()
        .expect_err("program does not exist");
    assert!(matches!(err, ToolError::Spawn { ref program, .. } if program.starts_with("definitely")));
}

#[cfg(unix)]
#[test]
fn output_lists_stdout_before_stderr() {
    let output = ToolCommand::new("sh")
        .arg("-c")
        .arg("echo err1 >&2; echo out1; echo out2; printf err2 >&2")
        .run()
        .expect("sh runs");

    assert_eq!(output.text, "out1\nout2\nerr1\nerr2\n");
    assert!(output.success);
    assert_eq!(output.exit_code, Some(0));
}

#[cfg(unix)]
#[test]
fn failing_tool_still_reports_output() {
    let task_output = ToolCommand::new("sh")
        .arg("-c")
        .arg("echo broken >&2; exit 3")
        .run()
        .expect("sh runs");

    assert!(!task_output.success);
    assert_eq!(task_output.exit_code, Some(3));
    assert_eq!(task_output.text, "broken\n");
}
