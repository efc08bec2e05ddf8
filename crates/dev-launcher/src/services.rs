//! Command lines for the two dev services.

use dev_process_manager::ServiceSpec;
use launcher_config_and_utils::{CommandOverride, Directories, ServiceOverrides};
use project_layout::{LayoutNames, ProjectLayout, ServiceRole};

/// Spec for `role`, with any configured program/args override applied.
pub fn service_spec(
    role: ServiceRole,
    layout: &ProjectLayout,
    overrides: &ServiceOverrides,
) -> ServiceSpec {
    let command = match role {
        ServiceRole::Frontend => &overrides.frontend,
        ServiceRole::Backend => &overrides.backend,
    };
    apply_override(ServiceSpec::for_role(role, layout.dir_for(role)), command)
}

fn apply_override(mut spec: ServiceSpec, command: &CommandOverride) -> ServiceSpec {
    if let Some(program) = &command.program {
        spec = spec.with_program(program.trim());
    }
    if let Some(args) = &command.args {
        spec = spec.with_args(args.iter().cloned());
    }
    spec
}

/// Sub-project directory names as understood by root resolution.
pub fn layout_names(directories: &Directories) -> LayoutNames {
    LayoutNames {
        frontend: directories.frontend.clone(),
        backend: directories.backend.clone(),
    }
}

/// Label used in the per-side "starting" notice.
pub fn tool_label(role: ServiceRole) -> &'static str {
    match role {
        ServiceRole::Frontend => "Vite",
        ServiceRole::Backend => "Flask",
    }
}

/// Remediation advice printed when a side fails to spawn.
pub fn remediation_hints(role: ServiceRole) -> &'static [&'static str] {
    match role {
        ServiceRole::Frontend => &[
            "Make sure `npm install` has been run in the frontend folder",
        ],
        ServiceRole::Backend => &[
            "Make sure Python 3.8+ is installed",
            "Try running: pip install flask flask-cors",
        ],
    }
}
