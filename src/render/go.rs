use crate::model::{Field, GenerationPlan, to_lower_camel};
use std::fmt::Write;

/// First line of every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by config-gen; DO NOT EDIT.";

const ETCD_CLIENT_IMPORT: &str = r#"clientv3 "go.etcd.io/etcd/client/v3""#;
const KONFIG_IMPORT: &str = r#"konfig "github.com/olefire/realtime-config-go""#;

/// Render config.go: the accessor interface, its etcd-backed implementation
/// and the constructor that seeds every field with its default.
///
/// Placeholders (`__NAME__`) are substituted rather than using `format!()`,
/// which would clash with the many `{}` in Go source. See [`fill`].
pub fn render_config(plan: &GenerationPlan) -> anyhow::Result<String> {
    const TEMPLATE: &str = r#"__HEADER__
package __PACKAGE__

import (
__IMPORTS__)

type __STRUCT__ interface {
__METHODS__}

type __IMPL__ struct {
__FIELDS__}

func New__STRUCT__(ctx context.Context, cli *clientv3.Client, prefix string) (*konfig.RealTimeConfig, __STRUCT__, error) {
	cfg := &__IMPL__{
__DEFAULTS__	}
	rtc, err := konfig.NewRealTimeConfig(ctx, cli, prefix, cfg)
	return rtc, cfg, err
}
__GETTERS__"#;

    let impl_name = to_lower_camel(&plan.struct_name);

    let mut imports = String::new();
    writeln!(imports, "\t\"context\"")?;
    for pkg in &plan.imports {
        writeln!(imports, "\t{:?}", pkg)?;
    }
    writeln!(imports)?;
    writeln!(imports, "\t{}", KONFIG_IMPORT)?;
    writeln!(imports, "\t{}", ETCD_CLIENT_IMPORT)?;

    let mut methods = String::new();
    let mut fields = String::new();
    let mut defaults = String::new();
    let mut getters = String::new();
    for f in &plan.fields {
        writeln!(methods, "\t{}", getter_doc(f))?;
        writeln!(methods, "\tGet{}() {}", f.name, f.resolved_type)?;

        writeln!(
            fields,
            "\t{} {} `etcd:\"{}\"`",
            f.var_name, f.resolved_type, f.original_name
        )?;

        writeln!(defaults, "\t\t{}: {},", f.var_name, f.default_literal)?;

        writeln!(getters)?;
        writeln!(getters, "{}", getter_doc(f))?;
        writeln!(
            getters,
            "func (c *{}) Get{}() {} {{",
            impl_name, f.name, f.resolved_type
        )?;
        writeln!(getters, "\treturn c.{}", f.var_name)?;
        writeln!(getters, "}}")?;
    }

    Ok(fill(
        TEMPLATE,
        &[
            ("__HEADER__", GENERATED_HEADER),
            ("__PACKAGE__", &plan.package_name),
            ("__IMPORTS__", &imports),
            ("__STRUCT__", &plan.struct_name),
            ("__IMPL__", &impl_name),
            ("__METHODS__", &methods),
            ("__FIELDS__", &fields),
            ("__DEFAULTS__", &defaults),
            ("__GETTERS__", &getters),
        ],
    ))
}

/// Render fake.go: a plain struct implementing the interface, for tests of
/// code that consumes the config.
pub fn render_fake(plan: &GenerationPlan) -> anyhow::Result<String> {
    const TEMPLATE: &str = r#"__HEADER__
package __PACKAGE__
__IMPORTS__
// Fake__STRUCT__ is an in-memory __STRUCT__ for tests.
type Fake__STRUCT__ struct {
__FIELDS__}

var _ __STRUCT__ = (*Fake__STRUCT__)(nil)
__GETTERS__"#;

    let imports = if plan.fields.iter().any(|f| f.resolved_type.contains("time.")) {
        "\nimport (\n\t\"time\"\n)\n"
    } else {
        ""
    };

    let mut fields = String::new();
    let mut getters = String::new();
    for f in &plan.fields {
        writeln!(fields, "\t{} {}", f.name, f.resolved_type)?;

        writeln!(getters)?;
        writeln!(getters, "{}", getter_doc(f))?;
        writeln!(
            getters,
            "func (f *Fake{}) Get{}() {} {{",
            plan.struct_name, f.name, f.resolved_type
        )?;
        writeln!(getters, "\treturn f.{}", f.name)?;
        writeln!(getters, "}}")?;
    }

    Ok(fill(
        TEMPLATE,
        &[
            ("__HEADER__", GENERATED_HEADER),
            ("__PACKAGE__", &plan.package_name),
            ("__IMPORTS__", imports),
            ("__STRUCT__", &plan.struct_name),
            ("__FIELDS__", &fields),
            ("__GETTERS__", &getters),
        ],
    ))
}

/// Substitute placeholders in one left-to-right pass. Substituted text is
/// never scanned again, so schema strings that look like placeholders are
/// copied through untouched.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;
    while let Some(at) = rest.find("__") {
        let tail = &rest[at..];
        match slots.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                out.push_str(&rest[..at + 2]);
                rest = &rest[at + 2..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `// GetPort returns the value of port. Server port`
///
/// Descriptions are folded onto one line so they cannot break out of the
/// comment.
fn getter_doc(f: &Field) -> String {
    let description = f.description.split_whitespace().collect::<Vec<_>>().join(" ");
    if description.is_empty() {
        format!("// Get{} returns the value of {}.", f.name, f.original_name)
    } else {
        format!(
            "// Get{} returns the value of {}. {}",
            f.name, f.original_name, description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldBuilder;
    use crate::schema::parse_schema;
    use pretty_assertions::assert_eq;

    fn plan(text: &str) -> GenerationPlan {
        FieldBuilder::default()
            .build_all(&parse_schema(text).unwrap())
            .unwrap()
    }

    #[test]
    fn renders_config() {
        let plan = plan(
            r#"
port:
  type: int
  default: 8080
  description: Server port
timeout:
  type: duration
  default: 5s
  description: "Upstream\n  response timeout"
"#,
        );

        let expected = r#"// Code generated by config-gen; DO NOT EDIT.
package config

import (
	"context"
	"time"

	konfig "github.com/olefire/realtime-config-go"
	clientv3 "go.etcd.io/etcd/client/v3"
)

type AppConfig interface {
	// GetPort returns the value of port. Server port
	GetPort() int
	// GetTimeout returns the value of timeout. Upstream response timeout
	GetTimeout() time.Duration
}

type appConfig struct {
	port int `etcd:"port"`
	timeout time.Duration `etcd:"timeout"`
}

func NewAppConfig(ctx context.Context, cli *clientv3.Client, prefix string) (*konfig.RealTimeConfig, AppConfig, error) {
	cfg := &appConfig{
		port: 8080,
		timeout: 5000000000 * time.Nanosecond,
	}
	rtc, err := konfig.NewRealTimeConfig(ctx, cli, prefix, cfg)
	return rtc, cfg, err
}

// GetPort returns the value of port. Server port
func (c *appConfig) GetPort() int {
	return c.port
}

// GetTimeout returns the value of timeout. Upstream response timeout
func (c *appConfig) GetTimeout() time.Duration {
	return c.timeout
}
"#;
        assert_eq!(render_config(&plan).unwrap(), expected);
    }

    #[test]
    fn renders_fake() {
        let plan = plan("app_name: {type: string, default: myapp}\n");

        let expected = r#"// Code generated by config-gen; DO NOT EDIT.
package config

// FakeAppConfig is an in-memory AppConfig for tests.
type FakeAppConfig struct {
	AppName string
}

var _ AppConfig = (*FakeAppConfig)(nil)

// GetAppName returns the value of app_name.
func (f *FakeAppConfig) GetAppName() string {
	return f.AppName
}
"#;
        assert_eq!(render_fake(&plan).unwrap(), expected);
    }

    #[test]
    fn time_import_only_when_needed() {
        let without = plan("port: {type: int, default: 1}\n");
        assert!(!render_config(&without).unwrap().contains("\"time\""));
        assert!(!render_fake(&without).unwrap().contains("import"));

        let with = plan("ttl: {type: duration, default: 1d}\n");
        assert!(render_config(&with).unwrap().contains("\t\"time\"\n"));
        assert!(render_fake(&with).unwrap().contains("\t\"time\"\n"));
    }

    #[test]
    fn placeholder_text_in_schema_is_copied_verbatim() {
        let plan = plan(
            "app_name: {type: string, default: __GETTERS__, description: see __FIELDS__}\n",
        );

        let config = render_config(&plan).unwrap();
        assert!(config.contains("\t\tappName: \"__GETTERS__\",\n"));
        assert!(config.contains("\t// GetAppName returns the value of app_name. see __FIELDS__\n"));
        assert_eq!(config.matches("func (c *appConfig) GetAppName()").count(), 1);

        let fake = render_fake(&plan).unwrap();
        assert!(fake.contains("// GetAppName returns the value of app_name. see __FIELDS__\n"));
        assert_eq!(fake.matches("\tAppName string\n").count(), 1);
    }

    #[test]
    fn fill_is_single_pass() {
        assert_eq!(
            fill("a __X__ b __Y__ c__", &[("__X__", "__Y__"), ("__Y__", "y")]),
            "a __Y__ b y c__"
        );
    }

    #[test]
    fn math_import_follows_literals() {
        let plan = plan("ratio: {type: float64, default: .inf}\n");
        let config = render_config(&plan).unwrap();
        assert!(config.contains("\t\"math\"\n"));
        assert!(config.contains("ratio: math.Inf(1),"));
        assert!(!render_fake(&plan).unwrap().contains("math"));
    }
}
