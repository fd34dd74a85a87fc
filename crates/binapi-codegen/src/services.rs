//! Service method synthesis.
//!
//! Services become one Go interface with a client implementation over an
//! `api.Channel`:
//!
//! | Service shape | Method |
//! |---------------|--------|
//! | `show_version` → `show_version_reply` | `ShowVersion(ctx, in *ShowVersion) (*ShowVersionReply, error)` |
//! | `sw_interface_dump` → stream of `sw_interface_details` | `DumpSwInterface(ctx, in *SwInterfaceDump) ([]*SwInterfaceDetails, error)` |
//! | `stats_enable` → no reply | `StatsEnable(ctx, in *StatsEnable) error` |

use crate::naming::camel_case_name;
use binapi_core::Service;

/// Name of the generated service interface.
pub const SERVICE_API_NAME: &str = "Service";

/// Name of the generated client implementation.
pub const SERVICE_IMPL_NAME: &str = "service";

/// How replies of a method are received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyShape {
    /// Request is sent without waiting for anything.
    None,
    /// Exactly one reply of the given Go type.
    Single(String),
    /// Replies of the given Go type until the stream ends.
    Stream(String),
}

/// Go client method generated for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMethod {
    pub name: String,
    pub request_type: String,
    pub reply: ReplyShape,
}

impl ServiceMethod {
    pub fn new(service: &Service) -> Self {
        let request_type = camel_case_name(&service.request_type);

        let mut name = request_type.clone();
        if service.stream
            && let Some(stem) = name.strip_suffix("Dump")
        {
            name = format!("Dump{stem}");
        }

        let reply = match (service.reply_type.is_empty(), service.stream) {
            (true, _) => ReplyShape::None,
            (false, true) => ReplyShape::Stream(camel_case_name(&service.reply_type)),
            (false, false) => ReplyShape::Single(camel_case_name(&service.reply_type)),
        };

        Self {
            name,
            request_type,
            reply,
        }
    }

    /// Go return type of the method.
    pub fn returns(&self) -> String {
        match &self.reply {
            ReplyShape::None => "error".to_string(),
            ReplyShape::Single(reply) => format!("(*{reply}, error)"),
            ReplyShape::Stream(reply) => format!("([]*{reply}, error)"),
        }
    }

    /// Method signature without receiver.
    pub fn signature(&self) -> String {
        format!(
            "{}(ctx context.Context, in *{}) {}",
            self.name,
            self.request_type,
            self.returns()
        )
    }

    /// Method of the client implementation, including its body.
    pub fn render_impl(&self) -> String {
        let mut code = format!("func (c *{SERVICE_IMPL_NAME}) {} {{\n", self.signature());

        match &self.reply {
            ReplyShape::Stream(reply) => {
                code.push_str(&format!("\tvar dump []*{reply}\n"));
                code.push_str("\treq := c.ch.SendMultiRequest(in)\n");
                code.push_str("\tfor {\n");
                code.push_str(&format!("\t\tm := new({reply})\n"));
                code.push_str("\t\tstop, err := req.ReceiveReply(m)\n");
                code.push_str("\t\tif stop {\n");
                code.push_str("\t\t\tbreak\n");
                code.push_str("\t\t}\n");
                code.push_str("\t\tif err != nil {\n");
                code.push_str("\t\t\treturn nil, err\n");
                code.push_str("\t\t}\n");
                code.push_str("\t\tdump = append(dump, m)\n");
                code.push_str("\t}\n");
                code.push_str("\treturn dump, nil\n");
            }
            ReplyShape::Single(reply) => {
                code.push_str(&format!("\tout := new({reply})\n"));
                code.push_str("\terr := c.ch.SendRequest(in).ReceiveReply(out)\n");
                code.push_str("\tif err != nil {\n");
                code.push_str("\t\treturn nil, err\n");
                code.push_str("\t}\n");
                code.push_str("\treturn out, nil\n");
            }
            ReplyShape::None => {
                code.push_str("\tc.ch.SendRequest(in)\n");
                code.push_str("\treturn nil\n");
            }
        }

        code.push_str("}\n");
        code
    }
}

/// Interface, client struct, constructor and methods for all services.
pub fn render_services(services: &[Service]) -> String {
    let methods: Vec<ServiceMethod> = services.iter().map(ServiceMethod::new).collect();

    let mut code = format!("type {SERVICE_API_NAME} interface {{\n");
    for method in &methods {
        code.push_str(&format!("\t{}\n", method.signature()));
    }
    code.push_str("}\n\n");

    code.push_str(&format!("type {SERVICE_IMPL_NAME} struct {{\n"));
    code.push_str("\tch api.Channel\n");
    code.push_str("}\n\n");

    code.push_str(&format!(
        "func New{SERVICE_API_NAME}(ch api.Channel) {SERVICE_API_NAME} {{\n"
    ));
    code.push_str(&format!("\treturn &{SERVICE_IMPL_NAME}{{ch}}\n"));
    code.push_str("}\n");

    for method in &methods {
        code.push('\n');
        code.push_str(&method.render_impl());
    }

    code
}

#[cfg(test)]
#[path = "services/services_tests.rs"]
mod services_tests;
