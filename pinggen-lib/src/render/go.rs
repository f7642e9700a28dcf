use super::RenderContext;
use super::naming::{camelize, clean_description};
use crate::Result;
use crate::catalog::{ExtraKeyType, Metric, MetricType};
use crate::codegen::{Aggregation, PingGroup, Target};
use core::fmt::Write;
use ohno::{app_err, bail};

/// A struct field: name, Go type and trailing comment.
type Field = (String, String, String);

pub fn generate<W: Write>(context: &RenderContext<'_, '_>, writer: &mut W) -> Result<()> {
    let with_events = context.has_event_metric;

    writeln!(writer, "// Code generated by {}. DO NOT EDIT.", context.version_string)?;
    writeln!(writer)?;
    writeln!(writer, "package {}", context.options.go_package)?;
    writeln!(writer)?;
    write_imports(writer)?;
    write_logger(writer, context)?;
    write_payload_types(writer, with_events)?;
    write_record(writer, context.version_string, with_events)?;

    for event in unique_events(context.aggregation) {
        write_event(writer, event)?;
    }

    for (ping, group) in context.aggregation.pings() {
        write_ping(writer, ping, group, with_events)?;
    }

    Ok(())
}

fn write_imports<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "import (")?;
    writeln!(writer, "\t\"encoding/json\"")?;
    writeln!(writer, "\t\"fmt\"")?;
    writeln!(writer, "\t\"io\"")?;
    writeln!(writer, "\t\"strconv\"")?;
    writeln!(writer, "\t\"time\"")?;
    writeln!(writer)?;
    writeln!(writer, "\t\"github.com/google/uuid\"")?;
    writeln!(writer, ")")?;
    writeln!(writer)?;
    Ok(())
}

fn write_logger<W: Write>(writer: &mut W, context: &RenderContext<'_, '_>) -> Result<()> {
    writeln!(writer, "// log type string used to identify logs to process in the Moz Data Pipeline")?;
    writeln!(writer, "var gleanEventMozlogType string = \"{}\"", context.options.mozlog_type)?;
    writeln!(writer)?;
    writeln!(writer, "type GleanEventsLogger struct {{")?;
    write_fields(
        writer,
        &[
            field("AppID", "string", "Application Id to identify application per Glean standards"),
            field("AppDisplayVersion", "string", "Version of application emitting the event"),
            field("AppChannel", "string", "Channel to differentiate logs from prod/beta/staging/devel"),
            field("Writer", "io.Writer", "Writer to output to. Normal operation expects os.Stdout"),
        ],
    )?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "// exported type for public method parameters")?;
    writeln!(writer, "type RequestInfo struct {{")?;
    writeln!(writer, "\tUserAgent string")?;
    writeln!(writer, "\tIpAddress string")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "// default empty values will be omitted in json from ping struct definition")?;
    writeln!(writer, "var defaultRequestInfo = RequestInfo{{")?;
    writeln!(writer, "\tUserAgent: \"\",")?;
    writeln!(writer, "\tIpAddress: \"\",")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    Ok(())
}

fn write_payload_types<W: Write>(writer: &mut W, with_events: bool) -> Result<()> {
    writeln!(writer, "// structure definitions to assemble the glean ping payload")?;
    writeln!(writer, "type clientInfo struct {{")?;
    write_fields(
        writer,
        &[
            tagged("TelemetrySDKBuild", "telemetry_sdk_build"),
            tagged("FirstRunDate", "first_run_date"),
            tagged("OS", "os"),
            tagged("OSVersion", "os_version"),
            tagged("Architecture", "architecture"),
            tagged("AppBuild", "app_build"),
            tagged("AppDisplayVersion", "app_display_version"),
            tagged("AppChannel", "app_channel"),
        ],
    )?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "type pingInfo struct {{")?;
    writeln!(writer, "\tSeq       int    `json:\"seq\"`")?;
    writeln!(writer, "\tStartTime string `json:\"start_time\"`")?;
    writeln!(writer, "\tEndTime   string `json:\"end_time\"`")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "type ping struct {{")?;
    write_fields(
        writer,
        &[
            tagged("DocumentNamespace", "document_namespace"),
            tagged("DocumentType", "document_type"),
            tagged("DocumentVersion", "document_version"),
            tagged("DocumentID", "document_id"),
            tagged("UserAgent", "user_agent,omitempty"),
            tagged("IpAddress", "ip_address,omitempty"),
            tagged("Payload", "payload"),
        ],
    )?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "type metrics map[string]map[string]interface{{}}")?;
    writeln!(writer)?;
    writeln!(writer, "type pingPayload struct {{")?;
    writeln!(writer, "\tClientInfo clientInfo   `json:\"client_info\"`")?;
    writeln!(writer, "\tPingInfo   pingInfo     `json:\"ping_info\"`")?;
    writeln!(writer, "\tMetrics    metrics      `json:\"metrics\"`")?;
    if with_events {
        writeln!(writer, "\tEvents     []gleanEvent `json:\"events\"`")?;
    }
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    if with_events {
        writeln!(writer, "type gleanEvent struct {{")?;
        writeln!(writer, "\tCategory  string            `json:\"category\"`")?;
        writeln!(writer, "\tName      string            `json:\"name\"`")?;
        writeln!(writer, "\tTimestamp int64             `json:\"timestamp\"`")?;
        writeln!(writer, "\tExtra     map[string]string `json:\"extra\"`")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;
        writeln!(writer, "func newGleanEvent(category, name string, extra map[string]string) gleanEvent {{")?;
        writeln!(writer, "\treturn gleanEvent{{")?;
        writeln!(writer, "\t\tCategory:  category,")?;
        writeln!(writer, "\t\tName:      name,")?;
        writeln!(writer, "\t\tTimestamp: time.Now().UnixMilli(),")?;
        writeln!(writer, "\t\tExtra:     extra,")?;
        writeln!(writer, "\t}}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;
    }

    writeln!(writer, "type logEnvelope struct {{")?;
    writeln!(writer, "\tTimestamp string")?;
    writeln!(writer, "\tLogger    string")?;
    writeln!(writer, "\tType      string")?;
    writeln!(writer, "\tFields    ping")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    Ok(())
}

fn write_record<W: Write>(writer: &mut W, version_string: &str, with_events: bool) -> Result<()> {
    writeln!(writer, "func (g GleanEventsLogger) createClientInfo() clientInfo {{")?;
    writeln!(writer, "\t// Fields with default values are required in the Glean schema, but not used in server context")?;
    writeln!(writer, "\treturn clientInfo{{")?;
    writeln!(writer, "\t\tTelemetrySDKBuild: \"{version_string}\",")?;
    writeln!(writer, "\t\tFirstRunDate:      \"Unknown\",")?;
    writeln!(writer, "\t\tOS:                \"Unknown\",")?;
    writeln!(writer, "\t\tOSVersion:         \"Unknown\",")?;
    writeln!(writer, "\t\tArchitecture:      \"Unknown\",")?;
    writeln!(writer, "\t\tAppBuild:          \"Unknown\",")?;
    writeln!(writer, "\t\tAppDisplayVersion: g.AppDisplayVersion,")?;
    writeln!(writer, "\t\tAppChannel:        g.AppChannel,")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(writer, "func createPingInfo() pingInfo {{")?;
    writeln!(writer, "\tnow := time.Now().UTC().Format(\"2006-01-02T15:04:05.000Z\")")?;
    writeln!(writer, "\treturn pingInfo{{")?;
    writeln!(writer, "\t\tSeq:       0,")?;
    writeln!(writer, "\t\tStartTime: now,")?;
    writeln!(writer, "\t\tEndTime:   now,")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "func (g GleanEventsLogger) createPing(documentType string, config RequestInfo, payload pingPayload) (ping, error) {{"
    )?;
    writeln!(writer, "\tpayloadJson, err := json.Marshal(payload)")?;
    writeln!(writer, "\tif err != nil {{")?;
    writeln!(writer, "\t\treturn ping{{}}, err")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "\tdocumentID, err := uuid.NewRandom()")?;
    writeln!(writer, "\tif err != nil {{")?;
    writeln!(writer, "\t\treturn ping{{}}, err")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "\treturn ping{{")?;
    writeln!(writer, "\t\tDocumentNamespace: g.AppID,")?;
    writeln!(writer, "\t\tDocumentType:      documentType,")?;
    writeln!(writer, "\t\tDocumentVersion:   \"1\",")?;
    writeln!(writer, "\t\tDocumentID:        documentID.String(),")?;
    writeln!(writer, "\t\tUserAgent:         config.UserAgent,")?;
    writeln!(writer, "\t\tIpAddress:         config.IpAddress,")?;
    writeln!(writer, "\t\tPayload:           string(payloadJson),")?;
    writeln!(writer, "\t}}, nil")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    writeln!(writer, "// method called by each ping-specific record method.")?;
    writeln!(writer, "// construct the ping, wrap it in the envelope, and print to the writer")?;
    if with_events {
        writeln!(
            writer,
            "func (g GleanEventsLogger) record(documentType string, requestInfo RequestInfo, metrics metrics, events []gleanEvent) error {{"
        )?;
    } else {
        writeln!(writer, "func (g GleanEventsLogger) record(documentType string, requestInfo RequestInfo, metrics metrics) error {{")?;
    }
    writeln!(writer, "\ttelemetryPayload := pingPayload{{")?;
    writeln!(writer, "\t\tClientInfo: g.createClientInfo(),")?;
    writeln!(writer, "\t\tPingInfo:   createPingInfo(),")?;
    writeln!(writer, "\t\tMetrics:    metrics,")?;
    if with_events {
        writeln!(writer, "\t\tEvents:     events,")?;
    }
    writeln!(writer, "\t}}")?;
    writeln!(writer)?;
    writeln!(writer, "\tping, err := g.createPing(documentType, requestInfo, telemetryPayload)")?;
    writeln!(writer, "\tif err != nil {{")?;
    writeln!(writer, "\t\treturn err")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer)?;
    writeln!(writer, "\tenvelope := logEnvelope{{")?;
    writeln!(writer, "\t\tTimestamp: strconv.FormatInt(time.Now().UnixNano(), 10),")?;
    writeln!(writer, "\t\tLogger:    \"glean\",")?;
    writeln!(writer, "\t\tType:      gleanEventMozlogType,")?;
    writeln!(writer, "\t\tFields:    ping,")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "\tenvelopeJson, err := json.Marshal(envelope)")?;
    writeln!(writer, "\tif err != nil {{")?;
    writeln!(writer, "\t\treturn err")?;
    writeln!(writer, "\t}}")?;
    writeln!(writer, "\tfmt.Fprintln(g.Writer, string(envelopeJson))")?;
    writeln!(writer)?;
    writeln!(writer, "\treturn nil")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    Ok(())
}

fn write_event<W: Write>(writer: &mut W, event: &Metric) -> Result<()> {
    let type_name = event_type_name(event);

    let mut fields = Vec::with_capacity(event.extra_keys.len());
    for (key, extra) in &event.extra_keys {
        fields.push((camelize(key), go_extra_type(event, key, extra.extra_type)?.to_string(), clean_description(&extra.description)));
    }

    writeln!(writer, "// {type_name} is the `{event}` event. {}", clean_description(&event.description))?;
    writeln!(writer, "type {type_name} struct {{")?;
    write_fields(writer, &fields)?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    writeln!(writer, "func (e {type_name}) gleanEvent() gleanEvent {{")?;
    if event.extra_keys.is_empty() {
        writeln!(writer, "\treturn newGleanEvent(\"{}\", \"{}\", map[string]string{{}})", event.category, event.name)?;
    } else {
        writeln!(writer, "\treturn newGleanEvent(\"{}\", \"{}\", map[string]string{{", event.category, event.name)?;
        for (key, extra) in &event.extra_keys {
            let value = match extra.extra_type {
                ExtraKeyType::Quantity => format!("strconv.FormatInt(e.{}, 10)", camelize(key)),
                ExtraKeyType::String | ExtraKeyType::Boolean => format!("e.{}", camelize(key)),
            };
            writeln!(writer, "\t\t\"{key}\": {value},")?;
        }
        writeln!(writer, "\t}})")?;
    }
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    Ok(())
}

fn write_ping<W: Write>(writer: &mut W, ping: &str, group: &PingGroup<'_>, with_events: bool) -> Result<()> {
    let type_name = ping_type_name(ping);
    let events = group.events();

    let mut fields = Vec::new();
    for (metric_type, metrics) in group.non_event_metrics() {
        let go_type = go_metric_type(metric_type)?;
        for metric in metrics {
            fields.push((metric_argument_name(metric), go_type.to_string(), clean_description(&metric.description)));
        }
    }
    if !events.is_empty() {
        fields.push(("Event".to_string(), format!("{type_name}Event"), "valid event for this ping".to_string()));
    }

    writeln!(writer, "// {type_name} holds the values recorded in the `{ping}` ping.")?;
    writeln!(writer, "type {type_name} struct {{")?;
    write_fields(writer, &fields)?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    if !events.is_empty() {
        writeln!(writer, "// {type_name}Event is implemented by every event that can be sent in the `{ping}` ping.")?;
        writeln!(writer, "type {type_name}Event interface {{")?;
        writeln!(writer, "\tis{type_name}Event()")?;
        writeln!(writer, "\tgleanEvent() gleanEvent")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;
        for event in events {
            writeln!(writer, "func (e {}) is{type_name}Event() {{}}", event_type_name(event))?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "// Record and submit `{ping}` ping")?;
    writeln!(writer, "func (g GleanEventsLogger) Record{type_name}(")?;
    writeln!(writer, "\trequestInfo RequestInfo,")?;
    writeln!(writer, "\tparams {type_name},")?;
    writeln!(writer, ") error {{")?;
    writeln!(writer, "\tmetrics := metrics{{")?;
    for (metric_type, metrics) in group.non_event_metrics() {
        writeln!(writer, "\t\t\"{metric_type}\": {{")?;
        for metric in metrics {
            writeln!(writer, "\t\t\t\"{}\": params.{},", metric.identifier(), metric_argument_name(metric))?;
        }
        writeln!(writer, "\t\t}},")?;
    }
    writeln!(writer, "\t}}")?;
    writeln!(writer)?;

    if !events.is_empty() {
        writeln!(writer, "\tevents := []gleanEvent{{}}")?;
        writeln!(writer, "\tif params.Event != nil {{")?;
        writeln!(writer, "\t\tevents = append(events, params.Event.gleanEvent())")?;
        writeln!(writer, "\t}}")?;
        writeln!(writer, "\treturn g.record(\"{ping}\", requestInfo, metrics, events)")?;
    } else if with_events {
        writeln!(writer, "\treturn g.record(\"{ping}\", requestInfo, metrics, []gleanEvent{{}})")?;
    } else {
        writeln!(writer, "\treturn g.record(\"{ping}\", requestInfo, metrics)")?;
    }
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    writeln!(writer, "// Record and submit `{ping}` ping omitting user request info")?;
    writeln!(writer, "func (g GleanEventsLogger) Record{type_name}WithoutUserInfo(")?;
    writeln!(writer, "\tparams {type_name},")?;
    writeln!(writer, ") error {{")?;
    writeln!(writer, "\treturn g.Record{type_name}(defaultRequestInfo, params)")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;
    Ok(())
}

/// Write struct fields with names, types and comments aligned the way gofmt does.
fn write_fields<W: Write>(writer: &mut W, fields: &[Field]) -> Result<()> {
    let name_width = fields.iter().map(|(name, _, _)| name.len()).max().unwrap_or(0);
    let type_width = fields.iter().map(|(_, go_type, _)| go_type.len()).max().unwrap_or(0);

    for (name, go_type, comment) in fields {
        if comment.is_empty() {
            writeln!(writer, "\t{name:<name_width$} {go_type}")?;
        } else {
            writeln!(writer, "\t{name:<name_width$} {go_type:<type_width$} // {comment}")?;
        }
    }

    Ok(())
}

fn field(name: &str, go_type: &str, comment: &str) -> Field {
    (name.to_string(), go_type.to_string(), comment.to_string())
}

/// A string field carrying a JSON tag in the type column so the tags line up.
fn tagged(name: &str, json_name: &str) -> Field {
    (name.to_string(), format!("string `json:\"{json_name}\"`"), String::new())
}

/// Events in first-seen order, each listed once even if sent in several pings.
fn unique_events<'a>(aggregation: &Aggregation<'a>) -> Vec<&'a Metric> {
    let mut events: Vec<&'a Metric> = Vec::new();
    for (_, group) in aggregation.pings() {
        for &event in group.events() {
            if !events.iter().any(|seen| core::ptr::eq(*seen, event)) {
                events.push(event);
            }
        }
    }
    events
}

fn event_type_name(metric: &Metric) -> String {
    format!("Event{}", Target::Go.metric_identifier(metric))
}

fn ping_type_name(ping: &str) -> String {
    format!("Ping{}", camelize(ping))
}

fn metric_argument_name(metric: &Metric) -> String {
    Target::Go.metric_identifier(metric)
}

fn go_metric_type(metric_type: MetricType) -> Result<&'static str> {
    match metric_type {
        MetricType::Quantity => Ok("int64"),
        MetricType::String => Ok("string"),
        _ => bail!("unable to generate a Go type for metric type '{metric_type}'"),
    }
}

fn go_extra_type(event: &Metric, key: &str, extra_type: ExtraKeyType) -> Result<&'static str> {
    Target::Go
        .extra_type_name(extra_type)
        .ok_or_else(|| app_err!("unable to generate a Go type for extra key '{key}' of event '{event}' with type '{extra_type}'"))
}
