//! Unit tests for command parameter encoding and response decoding.

use rstest::rstest;
use serde_json::json;

use super::SuccessResponse;
use super::address::{AssociateIpAddress, DisassociateIpAddress};
use super::firewall::{CreateFirewallRule, CreatePortForwardingRule, ListFirewallRulesResponse};
use super::webhook::CreateWebhook;
use crate::command::{Command, CommandResponse};
use crate::reshape::{self, ResultShape};

#[test]
fn create_firewall_rule_encodes_required_and_optional_params() {
    let params = CreateFirewallRule::new("ip-1", "tcp")
        .ports(80, 8080)
        .cidr_list(["0.0.0.0/0", "10.0.0.0/8"])
        .for_display(true)
        .params();

    assert_eq!(params.get("ipaddressid"), Some("ip-1"));
    assert_eq!(params.get("protocol"), Some("tcp"));
    assert_eq!(params.get("startport"), Some("80"));
    assert_eq!(params.get("endport"), Some("8080"));
    assert_eq!(params.get("cidrlist"), Some("0.0.0.0/0,10.0.0.0/8"));
    assert_eq!(params.get("fordisplay"), Some("true"));
    assert_eq!(params.get("icmptype"), None);
}

#[test]
fn port_forwarding_rule_encodes_port_ranges() {
    let params = CreatePortForwardingRule::new("ip-1", "tcp", 22, 2222, "vm-1")
        .end_ports(23, 2223)
        .open_firewall(false)
        .params();

    assert_eq!(params.get("privateport"), Some("22"));
    assert_eq!(params.get("publicport"), Some("2222"));
    assert_eq!(params.get("privateendport"), Some("23"));
    assert_eq!(params.get("publicendport"), Some("2223"));
    assert_eq!(params.get("virtualmachineid"), Some("vm-1"));
    assert_eq!(params.get("openfirewall"), Some("false"));
}

#[test]
fn associate_ip_address_without_options_sends_no_params() {
    assert!(AssociateIpAddress::new().params().is_empty());
}

#[test]
fn command_metadata_matches_api() {
    assert!(CreateFirewallRule::ASYNC);
    assert_eq!(CreateFirewallRule::SHAPE, ResultShape::Nested);
    assert_eq!(CreateFirewallRule::NUMERIC_FIELDS, &["startport", "endport"]);
    assert!(DisassociateIpAddress::ASYNC);
    assert_eq!(DisassociateIpAddress::SHAPE, ResultShape::Flat);
    assert!(!CreateWebhook::ASYNC);
    assert_eq!(CreateWebhook::NAME, "createWebhook");
}

#[rstest]
#[case::json_bool(json!({"success": true, "displaytext": "done"}), true)]
#[case::string_true(json!({"success": "true"}), true)]
#[case::string_false(json!({"success": "false"}), false)]
fn success_response_accepts_bool_or_string(
    #[case] payload: serde_json::Value,
    #[case] expected: bool,
) {
    let response: SuccessResponse =
        reshape::decode(payload).unwrap_or_else(|err| panic!("decode: {err}"));
    assert_eq!(response.success, expected);
}

#[test]
fn success_response_rejects_non_boolean_text() {
    let result: Result<SuccessResponse, _> = reshape::decode(json!({"success": "maybe"}));
    assert!(result.is_err());
}

#[test]
fn async_responses_record_job_id() {
    let mut response = SuccessResponse::default();
    response.set_job_id("job-1");
    assert_eq!(response.job_id, "job-1");
}

#[test]
fn firewall_list_with_string_ports_decodes_after_coercion() {
    let payload = json!({"count": 2, "firewallrule": [
        {"id": "r1", "protocol": "tcp", "startport": "22", "endport": "22"},
        {"id": "r2", "protocol": "icmp", "icmptype": -1, "icmpcode": -1}
    ]});

    let response: ListFirewallRulesResponse =
        reshape::reshape(payload, ResultShape::Flat, &["startport", "endport"])
            .unwrap_or_else(|err| panic!("reshape: {err}"));

    assert_eq!(response.count, 2);
    assert_eq!(response.firewall_rules.len(), 2);
    let ssh = &response.firewall_rules[0];
    assert_eq!((ssh.start_port, ssh.end_port), (Some(22), Some(22)));
    let icmp = &response.firewall_rules[1];
    assert_eq!((icmp.start_port, icmp.icmp_type), (None, Some(-1)));
}
