//! RequestLog entity <-> model mapper

use rpclog_core::entities::RequestLog;
use rpclog_core::value_objects::LogId;

use crate::models::RequestLogModel;

/// Convert RequestLogModel to RequestLog entity
impl From<RequestLogModel> for RequestLog {
    fn from(model: RequestLogModel) -> Self {
        RequestLog {
            id: LogId::new(model.id),
            description: model.description,
            request: model.request,
            response: model.response,
            exception: model.exception,
            server_ip: model.server_ip,
            stopwatch_result: model.stopwatch_result,
            stopwatch_duration: model.stopwatch_duration,
            api_name: model.api_name,
            created_from_ip: model.created_from_ip,
            created_from_ua: model.created_from_ua,
            created_by: model.created_by,
            create_time: Some(model.create_time),
        }
    }
}
