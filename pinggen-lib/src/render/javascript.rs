use super::RenderContext;
use super::naming::{camelize, js_single_quoted, jsdoc_description};
use crate::Result;
use crate::catalog::Metric;
use crate::codegen::{PingGroup, Target};
use core::fmt::Write;

pub fn generate<W: Write>(context: &RenderContext<'_, '_>, writer: &mut W) -> Result<()> {
    writeln!(writer, "// Code generated by {}. DO NOT EDIT.", context.version_string)?;
    writeln!(writer, "'use strict';")?;
    writeln!(writer)?;
    writeln!(writer, "const {{ randomUUID }} = require('crypto');")?;
    writeln!(writer)?;
    writeln!(writer, "// log type string used to identify logs to process in the Moz Data Pipeline")?;
    writeln!(writer, "const GLEAN_EVENT_MOZLOG_TYPE = '{}';", js_single_quoted(&context.options.mozlog_type))?;

    let mut factories = Vec::new();
    for (ping, group) in context.aggregation.pings() {
        writeln!(writer)?;
        write_ping_class(writer, context.version_string, ping, group)?;
        factories.push(factory_name(ping));
    }

    writeln!(writer)?;
    writeln!(writer, "module.exports = {{")?;
    for factory in &factories {
        writeln!(writer, "  {factory},")?;
    }
    writeln!(writer, "}};")?;
    Ok(())
}

fn write_ping_class<W: Write>(writer: &mut W, version_string: &str, ping: &str, group: &PingGroup<'_>) -> Result<()> {
    let class_name = class_name(ping);
    let metrics: Vec<&Metric> = group.non_event_metrics().flat_map(|(_, metrics)| metrics.iter().copied()).collect();

    writeln!(writer, "class {class_name} {{")?;
    writeln!(writer, "  /**")?;
    writeln!(writer, "   * Create {class_name} instance.")?;
    writeln!(writer, "   *")?;
    writeln!(writer, "   * @param {{string}} applicationId - The application ID.")?;
    writeln!(writer, "   * @param {{string}} appDisplayVersion - The application display version.")?;
    writeln!(writer, "   * @param {{string}} channel - The channel.")?;
    writeln!(writer, "   * @param {{Object}} logger - Logger used to emit the ping.")?;
    writeln!(writer, "   */")?;
    writeln!(writer, "  constructor(applicationId, appDisplayVersion, channel, logger) {{")?;
    writeln!(writer, "    this.applicationId = applicationId;")?;
    writeln!(writer, "    this.appDisplayVersion = appDisplayVersion;")?;
    writeln!(writer, "    this.channel = channel;")?;
    writeln!(writer, "    this.logger = logger;")?;
    writeln!(writer, "  }}")?;
    writeln!(writer)?;

    writeln!(writer, "  /**")?;
    writeln!(writer, "   * Record and submit a `{ping}` ping.")?;
    writeln!(writer, "   *")?;
    writeln!(writer, "   * @param {{Object}} params The values to record.")?;
    writeln!(writer, "   * @param {{string}} params.user_agent - The user agent.")?;
    writeln!(writer, "   * @param {{string}} params.ip_address - The IP address.")?;
    for metric in &metrics {
        writeln!(
            writer,
            "   * @param {{{}}} params.{} - {}",
            metric.metric_type,
            argument_name(metric),
            jsdoc_description(&metric.description)
        )?;
    }
    writeln!(writer, "   */")?;

    let mut arguments = vec!["user_agent".to_string(), "ip_address".to_string()];
    arguments.extend(metrics.iter().map(|metric| argument_name(metric)));
    writeln!(writer, "  record({{ {} }}) {{", arguments.join(", "))?;
    writeln!(writer, "    const now = new Date();")?;
    writeln!(writer, "    const timestamp = now.toISOString();")?;
    writeln!(writer, "    const eventPayload = {{")?;
    writeln!(writer, "      metrics: {{")?;
    for (metric_type, metrics) in group.non_event_metrics() {
        writeln!(writer, "        {metric_type}: {{")?;
        for metric in metrics {
            writeln!(writer, "          '{}': {},", metric.identifier(), argument_name(metric))?;
        }
        writeln!(writer, "        }},")?;
    }
    writeln!(writer, "      }},")?;
    writeln!(writer, "      ping_info: {{")?;
    writeln!(writer, "        seq: 0,")?;
    writeln!(writer, "        start_time: timestamp,")?;
    writeln!(writer, "        end_time: timestamp,")?;
    writeln!(writer, "      }},")?;
    writeln!(writer, "      // `Unknown` fields below are required in the Glean schema, but not used in server context")?;
    writeln!(writer, "      client_info: {{")?;
    writeln!(writer, "        telemetry_sdk_build: '{}',", js_single_quoted(version_string))?;
    writeln!(writer, "        first_run_date: 'Unknown',")?;
    writeln!(writer, "        os: 'Unknown',")?;
    writeln!(writer, "        os_version: 'Unknown',")?;
    writeln!(writer, "        architecture: 'Unknown',")?;
    writeln!(writer, "        app_build: 'Unknown',")?;
    writeln!(writer, "        app_display_version: this.appDisplayVersion,")?;
    writeln!(writer, "        app_channel: this.channel,")?;
    writeln!(writer, "      }},")?;
    writeln!(writer, "    }};")?;
    writeln!(writer, "    const eventPayloadSerialized = JSON.stringify(eventPayload);")?;
    writeln!(writer)?;
    writeln!(writer, "    // message structure expected by the ingestion decoder")?;
    writeln!(writer, "    const ping = {{")?;
    writeln!(writer, "      document_namespace: this.applicationId,")?;
    writeln!(writer, "      document_type: '{ping}',")?;
    writeln!(writer, "      document_version: '1',")?;
    writeln!(writer, "      document_id: randomUUID(),")?;
    writeln!(writer, "      user_agent: user_agent,")?;
    writeln!(writer, "      ip_address: ip_address,")?;
    writeln!(writer, "      payload: eventPayloadSerialized,")?;
    writeln!(writer, "    }};")?;
    writeln!(writer)?;
    writeln!(writer, "    // emitted as a mozlog entry of type GLEAN_EVENT_MOZLOG_TYPE")?;
    writeln!(writer, "    this.logger.info(GLEAN_EVENT_MOZLOG_TYPE, ping);")?;
    writeln!(writer, "  }}")?;
    writeln!(writer, "}}")?;
    writeln!(writer)?;

    let factory = factory_name(ping);
    writeln!(writer, "const {factory} = function ({{")?;
    writeln!(writer, "  applicationId,")?;
    writeln!(writer, "  appDisplayVersion,")?;
    writeln!(writer, "  channel,")?;
    writeln!(writer, "  logger,")?;
    writeln!(writer, "}}) {{")?;
    writeln!(writer, "  return new {class_name}(applicationId, appDisplayVersion, channel, logger);")?;
    writeln!(writer, "}};")?;
    Ok(())
}

fn class_name(ping: &str) -> String {
    format!("{}ServerEvent", camelize(ping))
}

fn factory_name(ping: &str) -> String {
    format!("create{}EventFn", camelize(ping))
}

/// Destructured parameter name of a metric.
fn argument_name(metric: &Metric) -> String {
    Target::Javascript.metric_identifier(metric)
}
