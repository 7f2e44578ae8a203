// content.rs
//
// Static workshop content: ordered steps, code cards, per-step notes and
// code snippets. Pure data keyed by step identifier; rendering decides how
// much of it to show.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visual {
    IdeFlow,
    Blink,
    Breadboard,
    Serial,
}

#[derive(Clone, Copy, Debug)]
pub struct Step {
    pub id: &'static str,
    pub phase: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub details: &'static [&'static str],
    pub visual: Option<Visual>,
}

#[derive(Clone, Copy, Debug)]
pub struct CodeCard {
    pub id: &'static str,
    pub title: &'static str,
    pub objective: &'static str,
    pub stub: &'static str,
    pub done_when: &'static [&'static str],
    pub hints: &'static [&'static str],
}

#[derive(Clone, Copy, Debug)]
pub struct LearningNote {
    pub concept: &'static str,
    pub terms: &'static [&'static str],
}

pub const STEPS: &[Step] = &[
    Step {
        id: "install_ide",
        phase: "Setup",
        title: "Install Arduino IDE 2",
        summary: "Start from zero: install Arduino IDE so you can upload code to the ESP32.",
        details: &[
            "Download Arduino IDE 2 from arduino.cc/en/software and install it.",
            "Open Arduino IDE once after install so it creates its settings folders.",
            "Connect ESP32 with a data USB cable (some USB cables are charge-only and will not work).",
        ],
        visual: Some(Visual::IdeFlow),
    },
    Step {
        id: "add_esp32_board",
        phase: "Setup",
        title: "Add ESP32 Board Support",
        summary: "Arduino IDE does not include ESP32 by default. Add the board package URL first.",
        details: &[
            "Open Arduino IDE -> Settings (or Preferences on macOS).",
            "Find Additional boards manager URLs and paste the ESP32 URL from the snippet.",
            "Open Boards Manager, search ESP32, install Espressif Systems package.",
        ],
        visual: None,
    },
    Step {
        id: "blink_warmup",
        phase: "Warmup",
        title: "Sketch 1.1 Blink (Practice Run)",
        summary: "After ESP32 board support is installed, do one fast flash cycle with Blink to get comfortable with breadboard wiring and upload flow.",
        details: &[
            "Wire the LED circuit exactly like the Freenove image from absolute page 42.",
            "Select board + port, then upload Blink to verify toolchain and cable/port setup.",
            "Expect a steady blink; this is your hardware/IDE sanity check before the main workshop sketch.",
        ],
        visual: Some(Visual::Blink),
    },
    Step {
        id: "install_libraries",
        phase: "Setup",
        title: "Install Required Library (MQTT)",
        summary: "Install PubSubClient so the sketch can publish sensor values over MQTT.",
        details: &[
            "Open Library Manager (book icon on left).",
            "Search for PubSubClient by Nick OLeary and click Install.",
            "The WiFi library is included with the ESP32 board package, no extra install needed.",
        ],
        visual: None,
    },
    Step {
        id: "breadboard",
        phase: "Hardware",
        title: "Build the Breadboard Circuit",
        summary: "Wire the thermistor voltage divider exactly as shown before uploading code.",
        details: &[
            "Breadboard basics: each 5-hole row is connected horizontally; power rails run vertically.",
            "Voltage divider: 3.3V -> thermistor -> ADC node -> 10k resistor -> GND.",
            "Connect ADC node to ESP32 GPIO34 (PIN_ANALOG_IN = 34).",
            "Important override to the tutorial image: it shows GPIO4, but for this workshop you must move that wire to GPIO34.",
            "Reason: GPIO4 is ADC2 and can fail when WiFi is active.",
        ],
        visual: Some(Visual::Breadboard),
    },
    Step {
        id: "mqtt_flash",
        phase: "Firmware",
        title: "Implement the Firmware (Functions + Loop)",
        summary: "Set project constants, implement helper functions, and structure the main loop for periodic reporting.",
        details: &[
            "Set WIFI_SSID and WIFI_PASSWORD to your local network.",
            "Set MQTT_BROKER, MQTT_PORT, and MQTT_TOPIC to your Mosquitto values.",
            "Implement setupWifi(), setupMqtt(), calculateTempC(), and report() based on step guidance.",
            "Ensure loop() runs mqtt.loop() every iteration and only reports every 10 seconds.",
            "Save and compile cleanly before moving to upload/verification.",
        ],
        visual: None,
    },
    Step {
        id: "first_upload",
        phase: "Firmware",
        title: "Upload Thermistor Sketch and Verify Serial Output",
        summary: "After wiring + implementation, upload the thermistor sketch and verify runtime logs in serial monitor at 115200 baud.",
        details: &[
            "Tools -> Board -> ESP32 Arduino -> ESP32 Dev Module (or your exact board).",
            "Tools -> Port -> select the USB port for your ESP32.",
            "Click Upload, open Serial Monitor, and set baud to 115200 (must match Serial.begin(115200)).",
        ],
        visual: Some(Visual::Serial),
    },
    Step {
        id: "services",
        phase: "Backend",
        title: "Start Mosquitto and Home Assistant",
        summary: "Bring up broker + Home Assistant containers from your workshop compose file.",
        details: &[
            "From workshop folder, start services using Docker Compose.",
            "Wait until both containers are running before testing messages.",
            "Your current compose uses host network mode, so broker should be reachable on LAN IP.",
        ],
        visual: None,
    },
    Step {
        id: "mqtt_test",
        phase: "Backend",
        title: "Confirm MQTT Messages Arrive",
        summary: "Subscribe to your topic and verify values every publish interval.",
        details: &[
            "Run mosquitto_sub with the same broker/port/topic used in the sketch.",
            "You should see values like 22.35 every ~10 seconds.",
            "If no messages: check ESP32 serial output and broker IP correctness.",
        ],
        visual: None,
    },
    Step {
        id: "ha_mqtt",
        phase: "Home Assistant",
        title: "Enable MQTT Integration in Home Assistant",
        summary: "Link Home Assistant to the broker before creating entities.",
        details: &[
            "In Home Assistant: Settings -> Devices & Services -> Add Integration -> MQTT.",
            "Enter broker host and port. Use auth only if broker requires credentials.",
            "After success, Home Assistant can subscribe to topic data.",
        ],
        visual: None,
    },
    Step {
        id: "ha_entity",
        phase: "Home Assistant",
        title: "Create Temperature Sensor Entity",
        summary: "Add YAML for an MQTT sensor bound to your topic, then reload or restart HA.",
        details: &[
            "Name and unique_id should stay stable so dashboards keep working.",
            "Use device_class temperature and state_class measurement for proper HA behavior.",
            "After reload, verify new entity appears under Developer Tools -> States.",
        ],
        visual: None,
    },
    Step {
        id: "dashboard",
        phase: "Validation",
        title: "Add Dashboard Card and Validate End to End",
        summary: "Place the entity on a dashboard and test physical temperature changes.",
        details: &[
            "Add Sensor or Gauge card for your MQTT entity.",
            "Touch or warm the thermistor and watch value change in Home Assistant.",
            "If stale values persist, verify topic string match and retained publish behavior.",
        ],
        visual: None,
    },
];

pub const BOARD_MANAGER_SNIPPET: &str = "\
Additional boards manager URLs:
https://raw.githubusercontent.com/espressif/arduino-esp32/gh-pages/package_esp32_index.json

Then install in Boards Manager:
ESP32 by Espressif Systems";

pub const BLINK_WARMUP_SNIPPET: &str = "\
// Warmup: simple blink (adapt LED pin to your page 42 wiring if needed)
const int LED_PIN = 4;

void setup() {
  pinMode(LED_PIN, OUTPUT);
}

void loop() {
  digitalWrite(LED_PIN, HIGH);
  delay(500);
  digitalWrite(LED_PIN, LOW);
  delay(500);
}";

pub const LIBRARY_SNIPPET: &str = "\
Arduino IDE -> Library Manager -> search:
PubSubClient (by Nick OLeary)

Required baud rate in this project:
115200";

pub const SERIAL_SNIPPET: &str = "\
Expected serial output (115200):
Setup start
Connecting to YOUR_WIFI_SSID
Connected, IP address:
192.168.x.x
Connecting to MQTT Broker 192.168.x.x:1883
Connected to MQTT
ADC value : 2060,  Voltage : 1.66V,  Temperature : 24.12C";

pub const FUNCTION_CONTRACTS_SNIPPET: &str = "\
// Provide implementations for these contracts (no starter implementation given):
void setupWifi();          // connect ESP32 to WiFi, retry until connected
void setupMqtt();          // connect MQTT client to broker, retry until connected
double calculateTempC();   // read ADC and return temperature in Celsius
void report(double tempC); // publish temperature payload to MQTT topic

// Hint: keep setup() and loop() thin, and delegate work to these helpers.";

pub const FULL_FIRMWARE_TEMPLATE_SNIPPET: &str = "\
#include <WiFi.h>
#include <PubSubClient.h>

#define PIN_ANALOG_IN 34

const char *WIFI_SSID = \"YOUR_WIFI_SSID\";
const char *WIFI_PASSWORD = \"YOUR_WIFI_PASSWORD\";

const char *MQTT_BROKER = \"192.168.x.x\";
const int MQTT_PORT = 1883;
const char *MQTT_TOPIC = \"home/workshop/temperature\";

unsigned long lastSendMs = 0;

WiFiClient wifiClient;
PubSubClient mqtt(wifiClient);

void setup() {
  Serial.begin(115200);
  delay(500);

  Serial.println(\"Setup start\");
  setupWifi();
  setupMqtt();
  Serial.println(\"Setup End\");
}

void loop() {
  if (WiFi.status() != WL_CONNECTED) {
    setupWifi();
  }
  if (!mqtt.connected()) {
    setupMqtt();
  }

  mqtt.loop(); // run every loop iteration

  if (millis() - lastSendMs < 10000) {
    return; // report every 10 seconds
  }

  lastSendMs = millis();
  report(calculateTempC());
}

void setupWifi() {
  // TODO: begin WiFi and block/retry until WL_CONNECTED
}

void setupMqtt() {
  // TODO: set server and block/retry until mqtt.connected() is true
}

double calculateTempC() {
  // TODO: paste/use the provided calculateTempC implementation from Card C
  return 0.0;
}

void report(double tempC) {
  // TODO: format payload and publish to MQTT_TOPIC (retain=true)
}";

pub const CALCULATE_TEMP_C_SNIPPET: &str = "\
double calculateTempC() {
  // Freenove section 12 constants (10k NTC thermistor, Beta 3950)
  const double R_FIXED = 10.0;   // kOhm fixed resistor
  const double R0 = 10.0;        // kOhm at 25C
  const double BETA = 3950.0;

  int adcValue = analogRead(PIN_ANALOG_IN);
  if (adcValue <= 0) {
    adcValue = 1;
  }
  if (adcValue >= 4095) {
    adcValue = 4094;
  }

  double voltage = (adcValue / 4095.0) * 3.3;
  double rt = R0 * voltage / (3.3 - voltage);
  double tempK = 1 / (1 / (273.15 + 25) + log(rt / R_FIXED) / BETA);
  double tempC = tempK - 273.15;

  Serial.printf(\"ADC value : %d,\\tVoltage : %.2fV, \\tTemperature : %.2fC\\n\", adcValue, voltage, tempC);
  return tempC;
}";

pub const INSTRUCTOR_DIAGNOSTICS_SNIPPET: &str = "\
# Docker service status
docker compose ps

# Container logs
docker compose logs --tail=80 mosquitto
docker compose logs --tail=80 homeassistant

# Check MQTT publish path manually
mosquitto_pub -h 192.168.1.28 -p 1883 -t home/workshop/temperature -m 23.5 -r";

pub const CODE_CARDS: &[CodeCard] = &[
    CodeCard {
        id: "setup_wifi",
        title: "Card A: write setupWifi()",
        objective: "Connect ESP32 to WiFi and block until connected.",
        stub: "\
void setupWifi() {
  // TODO: call WiFi.begin(WIFI_SSID, WIFI_PASSWORD)
  // TODO: loop until WiFi.status() == WL_CONNECTED
  // TODO: print local IP when connected
}",
        done_when: &[
            "Sketch keeps retrying until WiFi connection succeeds.",
            "Serial monitor prints a connecting message and final IP address.",
            "loop() no longer repeatedly fails because WiFi never connected.",
        ],
        hints: &[
            "Use WiFi.begin(...) once per reconnect attempt and poll WiFi.status().",
            "Add small delay inside retry loop so serial output remains readable.",
        ],
    },
    CodeCard {
        id: "setup_mqtt",
        title: "Card B: write setupMqtt()",
        objective: "Connect PubSubClient to broker and retry until connected.",
        stub: "\
void setupMqtt() {
  // TODO: mqtt.setServer(MQTT_BROKER, MQTT_PORT)
  // TODO: generate client ID
  // TODO: loop until mqtt.connect(...) returns true
}",
        done_when: &[
            "mqtt.connected() becomes true after boot.",
            "Serial monitor shows broker address and successful connection.",
            "Reconnection works if broker restarts.",
        ],
        hints: &[
            "Call mqtt.setServer once before attempting connect.",
            "Unique client IDs prevent session collisions across multiple boards.",
        ],
    },
    CodeCard {
        id: "calculate_temp_c",
        title: "Card C: use provided calculateTempC()",
        objective: "Use this implementation to read ADC and convert thermistor voltage to Celsius.",
        stub: CALCULATE_TEMP_C_SNIPPET,
        done_when: &[
            "Returned value is numeric and in plausible room range (about 15-35 C).",
            "Temperature changes when touching/warming thermistor.",
            "No divide-by-zero or NaN values in serial output.",
        ],
        hints: &[
            "This is calibrated for Freenove section 12 parts (10k fixed resistor + Beta 3950 thermistor).",
            "If your readings look off, verify wiring and resistor values before changing the formula.",
        ],
    },
    CodeCard {
        id: "report",
        title: "Card D: write report(tempC)",
        objective: "Format temperature and publish it to MQTT topic.",
        stub: "\
void report(double tempC) {
  // TODO: format payload text (e.g. 24.12)
  // TODO: call mqtt.publish(MQTT_TOPIC, payload, true)
  // TODO: print topic and payload to serial
}",
        done_when: &[
            "Payload appears on mosquitto_sub with expected decimal format.",
            "Topic matches Home Assistant sensor state_topic exactly.",
            "Retained message survives subscriber reconnect.",
        ],
        hints: &[
            "Use snprintf into a fixed-size char buffer.",
            "Keep report() only about publish/logging; calculate temp elsewhere.",
        ],
    },
];

const INSTRUCTOR_NOTES: &[(&str, &[&str])] = &[
    (
        "install_ide",
        &[
            "Have participants confirm they can open IDE before connecting hardware.",
            "Keep one known-good USB data cable at the front for quick cable swap testing.",
        ],
    ),
    (
        "add_esp32_board",
        &[
            "Common issue: URL pasted with trailing spaces or missing https.",
            "If installation fails, ask them to restart IDE and re-open Boards Manager.",
        ],
    ),
    (
        "blink_warmup",
        &[
            "Run this as a hard checkpoint before moving to thermistor + MQTT complexity.",
            "If Blink fails, stop and fix board/port/wiring basics first.",
        ],
    ),
    (
        "install_libraries",
        &[
            "Students often install similarly named libraries by mistake; verify exact library author.",
            "If compile fails on PubSubClient include, re-open Library Manager and check installed version.",
        ],
    ),
    (
        "breadboard",
        &[
            "Have students point to the ADC node physically before connecting jumper to GPIO34.",
            "Most wiring errors are power rail mistakes; check rails first, then component rows.",
        ],
    ),
    (
        "mqtt_flash",
        &[
            "Validate broker IP on projector and have everyone paste from a shared source.",
            "Encourage topic naming convention by table/group to avoid collisions in shared LAN.",
        ],
    ),
    (
        "first_upload",
        &[
            "If upload stalls, hold BOOT button on ESP32 during upload start.",
            "Wrong serial port selection is the top first-hour blocker in workshops.",
        ],
    ),
    (
        "services",
        &[
            "Run services before firmware troubleshooting to avoid false negatives.",
            "If one container fails, use logs command in diagnostics panel below.",
        ],
    ),
    (
        "mqtt_test",
        &[
            "Ask students to read one live payload aloud to confirm end-to-end path.",
            "If payload is retained and stale, power cycle sensor and compare timestamp behavior.",
        ],
    ),
    (
        "ha_mqtt",
        &[
            "If broker auth is disabled in workshop, explicitly call that out as LAN-only for safety.",
            "Keep one pre-configured HA instance as fallback demo for stuck participants.",
        ],
    ),
    (
        "ha_entity",
        &[
            "Unique_id must stay stable; changing it creates duplicate entities in HA.",
            "Use Developer Tools -> States to validate raw entity state before dashboard card setup.",
        ],
    ),
    (
        "dashboard",
        &[
            "Have students gently pinch thermistor between fingers for visible temperature rise.",
            "Close with a short recap on data path: sensor -> ESP32 -> MQTT -> Home Assistant.",
        ],
    ),
];

const LEARNING_NOTES: &[(&str, LearningNote)] = &[
    (
        "install_ide",
        LearningNote {
            concept: "Treat ESP32 like a tiny edge runtime: Arduino IDE is your editor + build + flash pipeline for that target device.",
            terms: &[
                "ESP32: hardware target",
                "Arduino IDE: local build + deploy tool",
                "USB data cable: physical deploy channel",
            ],
        },
    ),
    (
        "add_esp32_board",
        LearningNote {
            concept: "Board support is like installing a target-specific toolchain. Without it, your code cannot compile for ESP32.",
            terms: &[
                "Board package: target toolchain + metadata",
                "Board Manager: target installer",
                "Port: selected deployment device",
            ],
        },
    ),
    (
        "blink_warmup",
        LearningNote {
            concept: "Blink is the firmware equivalent of a smoke test: quick proof that build, flash, and hardware wiring are all functional.",
            terms: &[
                "Smoke test: minimal success check",
                "Digital output: HIGH/LOW pin state",
                "Flash cycle: edit -> upload -> verify",
            ],
        },
    ),
    (
        "install_libraries",
        LearningNote {
            concept: "Arduino libraries are dependencies. PubSubClient is equivalent to adding an MQTT client package in other ecosystems.",
            terms: &[
                "Library: dependency",
                "#include: compile-time import",
                "MQTT client: network abstraction",
            ],
        },
    ),
    (
        "breadboard",
        LearningNote {
            concept: "Breadboard wiring is your hardware graph. Wrong connection means runtime bug before firmware even starts.",
            terms: &[
                "Rail: shared power bus",
                "Node: equivalent to a shared variable",
                "Voltage divider: analog signal conditioner",
            ],
        },
    ),
    (
        "mqtt_flash",
        LearningNote {
            concept: "Think of setup() as bootstrapping main() and loop() as a single-threaded scheduler tick running forever.",
            terms: &[
                "setup(): startup lifecycle hook",
                "loop(): long-running event loop",
                "helper contracts: behavior spec without implementation",
            ],
        },
    ),
    (
        "first_upload",
        LearningNote {
            concept: "Upload is build + deploy. Serial Monitor is your live log stream from the board process.",
            terms: &[
                "Compile: target binary build",
                "Flash: deploy binary to device memory",
                "Baud rate: serial link configuration",
            ],
        },
    ),
    (
        "services",
        LearningNote {
            concept: "Mosquitto is your message bus; Home Assistant is a consuming app with entity/state modeling on top.",
            terms: &[
                "Broker: pub/sub router",
                "Container: isolated service runtime",
                "docker compose: local orchestration",
            ],
        },
    ),
    (
        "mqtt_test",
        LearningNote {
            concept: "Use pub/sub probes like integration tests: one producer, one consumer, fixed channel.",
            terms: &[
                "Publish: emit event payload",
                "Subscribe: consume event stream",
                "Topic: routing key",
            ],
        },
    ),
    (
        "ha_mqtt",
        LearningNote {
            concept: "Home Assistant integration is a connector config that binds your broker to HA entity state updates.",
            terms: &[
                "Integration: connector plugin",
                "Entity: typed domain object",
                "State: current persisted value",
            ],
        },
    ),
    (
        "ha_entity",
        LearningNote {
            concept: "YAML here acts like declarative schema: identity + metadata controls how HA interprets your stream.",
            terms: &[
                "YAML: declarative config",
                "unique_id: immutable primary key",
                "device_class: semantic type hint",
            ],
        },
    ),
    (
        "dashboard",
        LearningNote {
            concept: "Dashboard is the final read model. A changing card confirms full pipeline health from ADC read to UI render.",
            terms: &[
                "Card: UI projection of state",
                "End-to-end: full data path check",
                "Retained message: last-known event snapshot",
            ],
        },
    ),
];

// Static snippets attached to steps in the guide view. Snippets generated
// from the saved configuration live on the config page instead.
const STEP_SNIPPETS: &[(&str, &str, &str)] = &[
    ("add_esp32_board", "plaintext", BOARD_MANAGER_SNIPPET),
    ("blink_warmup", "cpp", BLINK_WARMUP_SNIPPET),
    ("install_libraries", "plaintext", LIBRARY_SNIPPET),
    ("first_upload", "plaintext", SERIAL_SNIPPET),
    ("mqtt_flash", "cpp", FULL_FIRMWARE_TEMPLATE_SNIPPET),
];

pub fn step_index(id: &str) -> Option<usize> {
    STEPS.iter().position(|s| s.id == id)
}

pub fn instructor_notes(id: &str) -> &'static [&'static str] {
    INSTRUCTOR_NOTES
        .iter()
        .find(|(sid, _)| *sid == id)
        .map(|(_, notes)| *notes)
        .unwrap_or(&[])
}

pub fn learning_note(id: &str) -> Option<&'static LearningNote> {
    LEARNING_NOTES
        .iter()
        .find(|(sid, _)| *sid == id)
        .map(|(_, note)| note)
}

/// Returns `(language, code)` for steps that carry a static snippet.
pub fn step_snippet(id: &str) -> Option<(&'static str, &'static str)> {
    STEP_SNIPPETS
        .iter()
        .find(|(sid, _, _)| *sid == id)
        .map(|(_, lang, code)| (*lang, *code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn step_ids_are_unique() {
        let mut seen = HashSet::new();
        for step in STEPS {
            assert!(seen.insert(step.id), "duplicate step id {}", step.id);
        }
    }

    #[test]
    fn every_step_has_notes() {
        for step in STEPS {
            assert!(learning_note(step.id).is_some(), "no learning note for {}", step.id);
            assert!(
                !instructor_notes(step.id).is_empty(),
                "no instructor notes for {}",
                step.id
            );
        }
    }

    #[test]
    fn snippet_lookup_only_matches_known_steps() {
        assert!(step_snippet("mqtt_flash").is_some());
        assert!(step_snippet("dashboard").is_none());
        assert!(step_snippet("nope").is_none());
        for (id, _, _) in STEP_SNIPPETS {
            assert!(step_index(id).is_some());
        }
    }
}

// EOF
