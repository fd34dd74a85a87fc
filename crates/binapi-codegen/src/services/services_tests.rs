#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn service(request: &str, reply: &str, stream: bool) -> Service {
    Service {
        name: format!("vpe.{request}"),
        request_type: request.to_string(),
        reply_type: reply.to_string(),
        stream,
        events: Vec::new(),
    }
}

// ============================================================================
// Method naming and signatures
// ============================================================================

#[test_case("sw_interface_dump", true, "DumpSwInterface")]
#[test_case("ip_address_dump", true, "DumpIPAddress")]
#[test_case("sw_interface_dump", false, "SwInterfaceDump")]
#[test_case("acl_interface_list", true, "ACLInterfaceList")]
#[test_case("show_version", false, "ShowVersion")]
fn ServiceMethod___name___moves_dump_for_streams(request: &str, stream: bool, expected: &str) {
    let method = ServiceMethod::new(&service(request, "reply", stream));

    assert_eq!(method.name, expected);
}

#[test]
fn ServiceMethod___unary___returns_pointer_and_error() {
    let method = ServiceMethod::new(&service("show_version", "show_version_reply", false));

    assert_eq!(
        method.signature(),
        "ShowVersion(ctx context.Context, in *ShowVersion) (*ShowVersionReply, error)"
    );
}

#[test]
fn ServiceMethod___stream___returns_slice_and_error() {
    let method = ServiceMethod::new(&service("sw_interface_dump", "sw_interface_details", true));

    assert_eq!(
        method.signature(),
        "DumpSwInterface(ctx context.Context, in *SwInterfaceDump) ([]*SwInterfaceDetails, error)"
    );
}

#[test]
fn ServiceMethod___no_reply___returns_error_only() {
    let method = ServiceMethod::new(&service("stats_enable", "", false));

    assert_eq!(method.reply, ReplyShape::None);
    assert_eq!(method.returns(), "error");
}

#[test]
fn ServiceMethod___stream_without_reply___is_fire_and_forget() {
    let method = ServiceMethod::new(&service("ping_dump", "", true));

    assert_eq!(method.name, "DumpPing");
    assert_eq!(method.reply, ReplyShape::None);
}

// ============================================================================
// Method bodies
// ============================================================================

#[test]
fn ServiceMethod___stream_body___drains_replies() {
    let method = ServiceMethod::new(&service("sw_interface_dump", "sw_interface_details", true));

    let code = method.render_impl();

    assert!(code.starts_with("func (c *service) DumpSwInterface("));
    assert!(code.contains("\tvar dump []*SwInterfaceDetails\n"));
    assert!(code.contains("req := c.ch.SendMultiRequest(in)"));
    assert!(code.contains("stop, err := req.ReceiveReply(m)"));
    assert!(code.contains("\t\tif stop {\n\t\t\tbreak\n"));
    assert!(code.contains("\t\t\treturn nil, err\n"));
    assert!(code.ends_with("\treturn dump, nil\n}\n"));
}

#[test]
fn ServiceMethod___unary_body___receives_one_reply() {
    let method = ServiceMethod::new(&service("show_version", "show_version_reply", false));

    let code = method.render_impl();

    assert!(code.contains("\tout := new(ShowVersionReply)\n"));
    assert!(code.contains("err := c.ch.SendRequest(in).ReceiveReply(out)"));
    assert!(code.ends_with("\treturn out, nil\n}\n"));
}

#[test]
fn ServiceMethod___fire_and_forget_body___only_sends() {
    let method = ServiceMethod::new(&service("stats_enable", "", false));

    let code = method.render_impl();

    assert_eq!(
        code,
        "func (c *service) StatsEnable(ctx context.Context, in *StatsEnable) error {\n\tc.ch.SendRequest(in)\n\treturn nil\n}\n"
    );
}

// ============================================================================
// Service block
// ============================================================================

#[test]
fn render_services___declares_interface_client_and_constructor() {
    let services = vec![
        service("show_version", "show_version_reply", false),
        service("sw_interface_dump", "sw_interface_details", true),
    ];

    let code = render_services(&services);

    assert!(code.starts_with("type Service interface {\n"));
    assert!(code.contains("\tShowVersion(ctx context.Context, in *ShowVersion) (*ShowVersionReply, error)\n"));
    assert!(code.contains("type service struct {\n\tch api.Channel\n}\n"));
    assert!(code.contains("func NewService(ch api.Channel) Service {\n\treturn &service{ch}\n}\n"));
    assert_eq!(code.matches("func (c *service) ").count(), 2);
}

#[test]
fn render_services___keeps_service_order() {
    let services = vec![
        service("b_dump", "b_details", true),
        service("a_get", "a_get_reply", false),
    ];

    let code = render_services(&services);

    assert!(code.find("DumpB(").unwrap() < code.find("AGet(").unwrap());
}
