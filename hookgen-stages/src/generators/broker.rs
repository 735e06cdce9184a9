//! Message broker stages. The broker is Kafka; topics come from
//! `[message_broker]`.

use std::{fmt, marker::PhantomData};

use async_trait::async_trait;
use eyre::{Result, eyre};
use hookgen_core::{Module, to_pascal_case};
use hookgen_pipeline::{GenerationContext, Stage, StageGenerator};

use crate::{CodeWriter, events::*, params::*};

/// A file of the broker integration.
pub trait BrokerFile: Stage<Params = BrokerParams> {
    /// Path relative to the broker directory.
    const FILE_NAME: &'static str;

    fn render(params: &BrokerParams) -> String;
}

/// Default behavior of the broker stages.
pub struct BrokerGenerator<S>(PhantomData<fn() -> S>);

impl<S> BrokerGenerator<S> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<S> Default for BrokerGenerator<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Stage> fmt::Debug for BrokerGenerator<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BrokerGenerator").field(&S::NAME).finish()
    }
}

#[async_trait]
impl<S: BrokerFile> StageGenerator<S> for BrokerGenerator<S> {
    fn params(&self, ctx: &GenerationContext) -> Result<BrokerParams> {
        let broker = ctx
            .resource()
            .message_broker
            .as_ref()
            .ok_or_else(|| eyre!("no message broker configured"))?;
        Ok(BrokerParams {
            directory: ctx.directories().server_path("src/kafka"),
            topics: broker.topics.clone(),
        })
    }

    async fn generate(&self, _ctx: &GenerationContext, params: &BrokerParams) -> Result<Vec<Module>> {
        Ok(vec![Module::new(
            format!("{}/{}", params.directory, S::FILE_NAME),
            S::render(params),
        )])
    }
}

/// `order.created` -> `OrderCreated`
fn topic_member(topic: &str) -> String {
    to_pascal_case(&topic.replace('.', "_"))
}

impl BrokerFile for CreateMessageBroker {
    const FILE_NAME: &'static str = "kafka.constants.ts";

    fn render(_params: &BrokerParams) -> String {
        CodeWriter::new()
            .line(r#"export const KAFKA_CLIENT = "KAFKA_CLIENT";"#)
            .line(r#"export const KAFKA_BROKERS_ENV = "KAFKA_BROKERS";"#)
            .line(r#"export const KAFKA_CLIENT_ID_ENV = "KAFKA_CLIENT_ID";"#)
            .build()
    }
}

impl BrokerFile for CreateMessageBrokerTopicsEnum {
    const FILE_NAME: &'static str = "topics.ts";

    fn render(params: &BrokerParams) -> String {
        CodeWriter::new()
            .block_with_close("export enum KafkaTopics {", "}", |w| {
                w.each(&params.topics, |w, topic| {
                    w.line(&format!("{} = {:?},", topic_member(topic), topic))
                })
            })
            .build()
    }
}

impl BrokerFile for CreateMessageBrokerNestJSModule {
    const FILE_NAME: &'static str = "kafka.module.ts";

    fn render(_params: &BrokerParams) -> String {
        CodeWriter::new()
            .line(r#"import { Global, Module } from "@nestjs/common";"#)
            .line(r#"import { ClientsModule } from "@nestjs/microservices";"#)
            .line(r#"import { KAFKA_CLIENT } from "./kafka.constants";"#)
            .line(r#"import { generateKafkaClientOptions } from "./generateKafkaClientOptions";"#)
            .line(r#"import { KafkaProducerService } from "./kafka.producer.service";"#)
            .blank()
            .line("@Global()")
            .block_with_close("@Module({", "})", |w| {
                w.block_with_close("imports: [", "],", |w| {
                    w.line("ClientsModule.register([{ name: KAFKA_CLIENT, ...generateKafkaClientOptions() }]),")
                })
                .line("providers: [KafkaProducerService],")
                .line("exports: [KafkaProducerService],")
            })
            .line("export class KafkaModule {}")
            .build()
    }
}

impl BrokerFile for CreateMessageBrokerClientOptionsFactory {
    const FILE_NAME: &'static str = "generateKafkaClientOptions.ts";

    fn render(_params: &BrokerParams) -> String {
        CodeWriter::new()
            .line(r#"import { KafkaOptions, Transport } from "@nestjs/microservices";"#)
            .line(r#"import { KAFKA_BROKERS_ENV, KAFKA_CLIENT_ID_ENV } from "./kafka.constants";"#)
            .blank()
            .block_with_close("export const generateKafkaClientOptions = (): KafkaOptions => {", "};", |w| {
                w.line(r#"const brokers = (process.env[KAFKA_BROKERS_ENV] ?? "").split(",");"#)
                    .block_with_close("return {", "};", |w| {
                        w.line("transport: Transport.KAFKA,").block_with_close(
                            "options: {",
                            "},",
                            |w| w.line("client: { clientId: process.env[KAFKA_CLIENT_ID_ENV], brokers },"),
                        )
                    })
            })
            .build()
    }
}

impl BrokerFile for CreateMessageBrokerService {
    const FILE_NAME: &'static str = "kafka.producer.service.ts";

    fn render(_params: &BrokerParams) -> String {
        CodeWriter::new()
            .line(r#"import { Injectable } from "@nestjs/common";"#)
            .line(r#"import { KafkaProducerServiceBase } from "./base/kafka.producer.service.base";"#)
            .blank()
            .line("@Injectable()")
            .line("export class KafkaProducerService extends KafkaProducerServiceBase {}")
            .build()
    }
}

impl BrokerFile for CreateMessageBrokerServiceBase {
    const FILE_NAME: &'static str = "base/kafka.producer.service.base.ts";

    fn render(_params: &BrokerParams) -> String {
        CodeWriter::new()
            .line(r#"import { Inject } from "@nestjs/common";"#)
            .line(r#"import { ClientKafka } from "@nestjs/microservices";"#)
            .line(r#"import { KAFKA_CLIENT } from "../kafka.constants";"#)
            .line(r#"import { KafkaTopics } from "../topics";"#)
            .blank()
            .block_with_close("export class KafkaProducerServiceBase {", "}", |w| {
                w.line("constructor(@Inject(KAFKA_CLIENT) protected readonly client: ClientKafka) {}")
                    .blank()
                    .block_with_close(
                        "async emitMessage(topic: KafkaTopics, message: unknown): Promise<void> {",
                        "}",
                        |w| w.line("await this.client.emit(topic, JSON.stringify(message)).toPromise();"),
                    )
            })
            .build()
    }
}
